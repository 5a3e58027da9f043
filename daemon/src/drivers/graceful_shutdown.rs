use log::{debug, error, info, warn};
use tokio::select;
use tokio::task::JoinSet;

use super::driver::Driver;
use crate::management::Supervisor;
use std::sync::Arc;
use tokio::sync::Notify;

pub struct GracefulShutdown {
    drivers: Vec<Arc<dyn Driver>>,
}

impl Default for GracefulShutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl GracefulShutdown {
    pub fn new() -> Self {
        Self { drivers: vec![] }
    }
}

impl GracefulShutdown {
    pub fn add_driver(&mut self, driver: Arc<dyn Driver>) {
        self.drivers.push(driver);
    }

    /// Runs all drivers until Ctrl-C or a driver failure, then notifies them
    /// to stop and brings the server down.
    pub async fn watch(mut self, stop_notify: Arc<Notify>, supervisor: Arc<Supervisor>) {
        let mut join_set = JoinSet::new();
        for driver in self.drivers.drain(..) {
            join_set.spawn(async move { (driver.get_driver_type(), driver.run().await) });
        }
        debug!("graceful shutdown start watching");

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut signal_installed = true;

        loop {
            select! {
                signal = &mut ctrl_c, if signal_installed => match signal {
                    Ok(()) => {
                        info!("ctrl+c received, shutting down");
                        break;
                    }
                    Err(err) => {
                        error!("graceful shutdown can't install ctrl+c signal handler: {}", err);
                        signal_installed = false;
                    }
                },
                joined = join_set.join_next() => match joined {
                    Some(Ok((driver, Err(err)))) => {
                        error!("driver {:?} failed: {:#}", driver, err);
                        break;
                    }
                    Some(Ok((driver, Ok(())))) => debug!("driver {:?} finished", driver),
                    Some(Err(err)) => {
                        error!("driver task panicked: {}", err);
                        break;
                    }
                    None => break,
                },
            }
        }

        stop_notify.notify_waiters();
        supervisor.shutdown().await;

        while let Some(joined) = join_set.join_next().await {
            if let Ok((driver, Err(err))) = joined {
                warn!("driver {:?} stopped with error: {:#}", driver, err);
            }
        }
    }
}
