use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let (commit_id, commit) = self.write_commit(message, Vec::new())?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.current_branch(),
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
