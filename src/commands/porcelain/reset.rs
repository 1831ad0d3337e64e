use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use std::io::Write;

impl Repository {
    /// Check out every file of `revision` and move the current branch to it.
    pub fn reset(&mut self, revision: &str) -> anyhow::Result<()> {
        let target_oid = Revision::try_parse(revision)?.resolve(self)?;
        let target = self.database().parse_object_as_commit(&target_oid)?;

        self.materialize(&target_oid)?;
        self.refs().update_branch(self.current_branch(), &target_oid)?;

        writeln!(
            self.writer(),
            "HEAD is now at {} {}",
            target_oid.to_short_oid(),
            target.short_message()
        )?;

        Ok(())
    }
}
