use crate::config::Config;
use crate::errors::AppError;
use crate::ledger::apply_missed_daily_charges;
use crate::models::AppData;
use crate::storage::persist_data;
use chrono::NaiveDate;
use std::{path::Path, sync::Arc};
use tokio::sync::{Mutex, MutexGuard};

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<Mutex<AppData>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, data: AppData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            config: Arc::new(config),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    /// Locks the ledger after charging any days missed since the last request.
    pub async fn settled(&self, today: NaiveDate) -> Result<MutexGuard<'_, AppData>, AppError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        if apply_missed_daily_charges(&mut next, today, self.config.default_target) {
            persist_data(self.data_path(), &next).await?;
            *data = next;
        }
        Ok(data)
    }

    /// Applies `change` to a copy of the settled ledger. The copy replaces the
    /// in-memory ledger only after it has been written to disk.
    pub async fn update<T>(
        &self,
        today: NaiveDate,
        change: impl FnOnce(&mut AppData) -> T,
    ) -> Result<T, AppError> {
        let mut data = self.settled(today).await?;
        let mut next = data.clone();
        let out = change(&mut next);
        persist_data(self.data_path(), &next).await?;
        *data = next;
        Ok(out)
    }
}
