use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// First-parent history of the current branch, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        for entry in RevList::new(self.database(), self.head_oid()?) {
            let (commit_oid, commit) = entry?;
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit in the object store, newest first
    pub fn global_log(&self) -> anyhow::Result<()> {
        for (commit_oid, commit) in self.all_commits()? {
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Print the id of every commit whose message is exactly `message`.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        let matches = self
            .all_commits()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(commit_oid, _)| commit_oid)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(RepositoryError::NoCommitWithMessage.into());
        }

        for commit_oid in matches {
            writeln!(self.writer(), "{commit_oid}")?;
        }

        Ok(())
    }

    fn all_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let database = self.database();

        let mut commits = Vec::new();
        for oid in database.list_objects()? {
            if let Some(commit) = database.parse_object_if_commit(&oid)? {
                commits.push((oid, commit));
            }
        }
        // ties broken by id so the order is stable across runs
        commits.sort_by(|(a_oid, a), (b_oid, b)| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a_oid.as_ref().cmp(b_oid.as_ref()))
        });

        Ok(commits)
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "{}", format!("commit {commit_oid}").yellow())?;
        if commit.is_merge() {
            let short_parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "Merge: {short_parents}")?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
