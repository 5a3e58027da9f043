use super::Drivers;

#[async_trait::async_trait]
pub trait Driver: Send + Sync {
    /// Runs until the application's stop notification fires. An error ends
    /// the whole daemon.
    async fn run(&self) -> anyhow::Result<()>;

    fn get_driver_type(&self) -> Drivers;
}
