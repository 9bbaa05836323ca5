use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::submit::{ServerResponse, SubmitClient};
use crate::validation::{self, FieldName, ValidationResult};

/// Class toggled on inputs that failed validation
pub const ERROR_CLASS: &str = "error";

/// Content shown in the result container after a successful submission
pub const SUCCESS_TEXT: &str = "Success";

pub const DEFAULT_LOADER_DELAY: Duration = Duration::from_millis(100);

/// Plain data object holding the form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub fio: String,
    pub email: String,
    pub phone: String,
}

impl FormData {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Fio => &self.fio,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldName::Fio => self.fio = value,
            FieldName::Email => self.email = value,
            FieldName::Phone => self.phone = value,
        }
    }
}

/// Ordered, duplicate-free set of CSS classes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    /// Add `class` when `force` is set, remove it otherwise
    pub fn toggle(&mut self, class: &str, force: bool) {
        if force {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: FieldName,
    pub value: String,
    pub classes: ClassList,
}

impl Input {
    fn new(name: FieldName) -> Self {
        Self {
            name,
            value: String::new(),
            classes: ClassList::default(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.classes.contains(ERROR_CLASS)
    }
}

/// Where the submission status is reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultContainer {
    pub classes: ClassList,
    pub content: String,
}

/// How a call to [`InputForm::submit`] ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent
    Invalid(ValidationResult),
    Success,
    Error { reason: String },
    /// The server answered with a status outside success/error/progress
    Unrecognized { status: String },
    /// The request failed or the reply could not be read
    Failed { message: String },
}

/// Submit button and loader state, published while a submission runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub submit_disabled: bool,
    pub loader_visible: bool,
}

/// Headless model of the bound form: three inputs, a submit button,
/// a delayed loader and a result container.
#[derive(Debug)]
pub struct InputForm {
    action: String,
    inputs: Vec<Input>,
    controls: watch::Sender<Controls>,
    loader_delay: Duration,
    result: ResultContainer,
}

impl InputForm {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            inputs: FieldName::ALL.into_iter().map(Input::new).collect(),
            controls: watch::channel(Controls::default()).0,
            loader_delay: DEFAULT_LOADER_DELAY,
            result: ResultContainer::default(),
        }
    }

    pub fn with_loader_delay(mut self, delay: Duration) -> Self {
        self.loader_delay = delay;
        self
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn input(&self, name: FieldName) -> Option<&Input> {
        self.inputs.iter().find(|input| input.name == name)
    }

    pub fn controls(&self) -> Controls {
        *self.controls.borrow()
    }

    /// Follow the submit button and loader while [`InputForm::submit`] runs
    pub fn subscribe(&self) -> watch::Receiver<Controls> {
        self.controls.subscribe()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.controls().submit_disabled
    }

    pub fn is_loader_visible(&self) -> bool {
        self.controls().loader_visible
    }

    pub fn result(&self) -> &ResultContainer {
        &self.result
    }

    pub fn validate(&self) -> ValidationResult {
        validation::validate(&self.get_data())
    }

    pub fn get_data(&self) -> FormData {
        self.inputs
            .iter()
            .fold(FormData::default(), |mut data, input| {
                data.set(input.name, input.value.as_str());
                data
            })
    }

    /// Copy non-empty values from `data` into the matching inputs
    pub fn set_data(&mut self, data: &FormData) {
        for input in &mut self.inputs {
            let value = data.get(input.name);
            if !value.is_empty() {
                input.value = value.to_string();
            }
        }
    }

    /// Validate, then poll the form action until it reports a final status
    pub async fn submit(&mut self, client: &SubmitClient) -> SubmitOutcome {
        let validation = self.validate();

        if !validation.is_valid {
            for input in &mut self.inputs {
                input
                    .classes
                    .toggle(ERROR_CLASS, validation.has_error(input.name));
            }
            info!(errors = ?validation.error_fields, "Form validation failed");
            return SubmitOutcome::Invalid(validation);
        }

        for input in &mut self.inputs {
            input.classes.remove(ERROR_CLASS);
        }

        self.result.content.clear();
        self.controls.send_modify(|c| c.submit_disabled = true);

        let action = self.action.clone();
        let loader_delay = self.loader_delay;
        let result = &mut self.result;
        let polling = poll_until_done(client, &action, result);
        tokio::pin!(polling);

        // The loader only appears if the submission outlives the delay
        let outcome = tokio::select! {
            outcome = &mut polling => outcome,
            _ = tokio::time::sleep(loader_delay) => {
                self.controls.send_modify(|c| c.loader_visible = true);
                polling.await
            }
        };

        self.controls.send_replace(Controls::default());

        outcome
    }
}

async fn poll_until_done(
    client: &SubmitClient,
    url: &str,
    result: &mut ResultContainer,
) -> SubmitOutcome {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let response = match client.fetch_status(url).await {
            Ok(response) => response,
            Err(err) => {
                warn!(attempt, error = %err, "Form submission failed");
                result.classes.clear();
                result.content = err.to_string();
                return SubmitOutcome::Failed {
                    message: err.to_string(),
                };
            }
        };

        result.classes.add(response.status());

        match response {
            ServerResponse::Success => {
                info!(attempt, "Form submitted");
                result.content = SUCCESS_TEXT.to_string();
                return SubmitOutcome::Success;
            }
            ServerResponse::Error { reason } => {
                info!(attempt, %reason, "Form submission rejected");
                result.content = reason.clone();
                return SubmitOutcome::Error { reason };
            }
            ServerResponse::Progress { retry_after } => {
                info!(attempt, ?retry_after, "Submission in progress, polling again");
                tokio::time::sleep(retry_after).await;
            }
            ServerResponse::Other { status } => {
                warn!(attempt, %status, "Unrecognized submission status");
                return SubmitOutcome::Unrecognized { status };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_data() -> FormData {
        FormData {
            fio: "Petrov Petr Petrovich".to_string(),
            email: "petrov@yandex.ru".to_string(),
            phone: "+7(111)222-33-11".to_string(),
        }
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = InputForm::new("/submit");
        assert_eq!(form.get_data(), FormData::default());
        assert_eq!(form.inputs().len(), 3);
        assert!(!form.is_submit_disabled());
        assert!(!form.is_loader_visible());
        assert_eq!(form.result(), &ResultContainer::default());
    }

    #[test]
    fn test_set_data_then_get_data() {
        let mut form = InputForm::new("/submit");
        form.set_data(&valid_data());
        assert_eq!(form.get_data(), valid_data());
        assert!(form.validate().is_valid);
    }

    #[test]
    fn test_set_data_skips_empty_values() {
        let mut form = InputForm::new("/submit");
        form.set_data(&valid_data());

        form.set_data(&FormData {
            fio: String::new(),
            email: "other@ya.ru".to_string(),
            phone: String::new(),
        });

        let data = form.get_data();
        assert_eq!(data.fio, "Petrov Petr Petrovich");
        assert_eq!(data.email, "other@ya.ru");
        assert_eq!(data.phone, "+7(111)222-33-11");
    }

    #[test]
    fn test_form_data_ignores_unknown_keys() {
        let data: FormData =
            serde_json::from_str(r#"{"fio":"A B C","address":"Moscow"}"#).unwrap();
        assert_eq!(data.fio, "A B C");
        assert_eq!(data.email, "");
    }

    #[test]
    fn test_class_list_toggle() {
        let mut classes = ClassList::default();
        classes.toggle(ERROR_CLASS, true);
        classes.toggle(ERROR_CLASS, true);
        classes.add("progress");
        assert_eq!(classes.to_string(), "error progress");

        classes.toggle(ERROR_CLASS, false);
        assert!(!classes.contains(ERROR_CLASS));
        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["progress"]);
    }

    #[tokio::test]
    async fn test_invalid_submit_marks_only_failing_inputs() {
        let client = SubmitClient::from_client(reqwest::Client::new());
        // Unroutable action: an invalid form must never reach the network
        let mut form = InputForm::new("http://127.0.0.1:9/never");
        form.set_data(&FormData {
            email: "bad@gmail.com".to_string(),
            ..valid_data()
        });

        let outcome = form.submit(&client).await;
        match outcome {
            SubmitOutcome::Invalid(result) => {
                assert_eq!(result.error_fields, vec![FieldName::Email]);
            }
            other => panic!("expected invalid outcome, got {other:?}"),
        }

        assert!(form.input(FieldName::Email).unwrap().has_error());
        assert!(!form.input(FieldName::Fio).unwrap().has_error());
        assert!(!form.input(FieldName::Phone).unwrap().has_error());
        assert!(!form.is_submit_disabled());
        assert!(form.result().content.is_empty());
    }

    #[tokio::test]
    async fn test_fixing_a_field_clears_its_error_class() {
        let client = SubmitClient::from_client(reqwest::Client::new());
        let mut form = InputForm::new("http://127.0.0.1:9/never");
        form.set_data(&FormData {
            fio: "Petrov".to_string(),
            phone: "+7(999)999-99-99".to_string(),
            ..valid_data()
        });

        form.submit(&client).await;
        assert!(form.input(FieldName::Fio).unwrap().has_error());
        assert!(form.input(FieldName::Phone).unwrap().has_error());

        form.set_data(&FormData {
            fio: "Petrov Petr Petrovich".to_string(),
            ..FormData::default()
        });
        form.submit(&client).await;

        assert!(!form.input(FieldName::Fio).unwrap().has_error());
        assert!(form.input(FieldName::Phone).unwrap().has_error());
    }
}
