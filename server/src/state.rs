use std::sync::Arc;

use color_eyre::eyre::WrapErr;

use crate::config::FormConfig;
use crate::form::InputForm;
use crate::submit::SubmitClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FormConfig>,
    pub submit_client: SubmitClient,
}

impl AppState {
    pub fn new(config: FormConfig) -> color_eyre::Result<Self> {
        let submit_client = SubmitClient::new(config.request_timeout)
            .wrap_err("Failed to build the submission HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            submit_client,
        })
    }

    pub fn from_env() -> color_eyre::Result<Self> {
        let config = FormConfig::from_env()?;
        tracing::info!(submit_url = %config.submit_url, "Loaded form configuration");

        Self::new(config)
    }

    /// A fresh, empty form bound to the configured submission endpoint
    pub fn new_form(&self) -> InputForm {
        InputForm::new(self.config.submit_url.clone()).with_loader_delay(self.config.loader_delay)
    }
}
