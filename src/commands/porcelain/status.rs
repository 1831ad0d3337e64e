use crate::areas::repository::Repository;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let status_info = self.status_inspector().initialize()?;
        status_info.render(&mut **self.writer())
    }
}
