use maud::{html, Markup, Render};

use crate::components::ui::button::Button;
use crate::form::{ClassList, Controls, Input, InputForm};
use crate::validation::FieldName;

pub const FORM_ID: &str = "myForm";
pub const SUBMIT_BUTTON_ID: &str = "submitButton";
pub const SUBMIT_LOADER_ID: &str = "submitLoader";
pub const RESULT_CONTAINER_ID: &str = "resultContainer";

pub struct InputField {
    pub name: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub value: Option<String>,
    pub input_type: String,
    pub classes: ClassList,
}

impl InputField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            placeholder: None,
            value: None,
            input_type: "text".to_string(),
            classes: ClassList::default(),
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn input_type(mut self, input_type: &str) -> Self {
        self.input_type = input_type.to_string();
        self
    }

    pub fn classes(mut self, classes: ClassList) -> Self {
        self.classes = classes;
        self
    }
}

impl From<&Input> for InputField {
    fn from(input: &Input) -> Self {
        let (label, placeholder, input_type) = match input.name {
            FieldName::Fio => ("Full name", "Ivanov Ivan Ivanovich", "text"),
            FieldName::Email => ("Email", "ivanov@yandex.ru", "email"),
            FieldName::Phone => ("Phone", "+7(111)222-33-11", "tel"),
        };

        InputField::new(input.name.as_str())
            .label(label)
            .placeholder(placeholder)
            .input_type(input_type)
            .value(&input.value)
            .classes(input.classes.clone())
    }
}

impl Render for InputField {
    fn render(&self) -> Markup {
        // Model classes first so `.form-input input.error` matches
        let classes = format!(
            "{} w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-indigo-500 text-gray-900",
            self.classes
        );

        html! {
            div class="form-input mb-4" {
                @if let Some(label) = &self.label {
                    label for=(self.name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
                }

                input
                    type=(self.input_type)
                    name=(self.name)
                    id=(self.name)
                    value=(self.value.as_deref().unwrap_or(""))
                    placeholder=(self.placeholder.as_deref().unwrap_or(""))
                    class=(classes.trim_start()) {}
            }
        }
    }
}

/// Renders the full state of an [`InputForm`]: inputs, submit button,
/// loader and result container.
pub struct FormView<'a> {
    pub form: &'a InputForm,
    /// Where the rendered form posts back to
    pub post_to: String,
    pub controls: Controls,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a InputForm, post_to: &str) -> Self {
        Self {
            form,
            post_to: post_to.to_string(),
            controls: form.controls(),
        }
    }

    /// Render button and loader from a snapshot taken while a submission runs
    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }
}

impl Render for FormView<'_> {
    fn render(&self) -> Markup {
        let result = self.form.result();
        let loader_style = if self.controls.loader_visible {
            "display: block"
        } else {
            "display: none"
        };

        html! {
            form id=(FORM_ID) action=(self.post_to) method="post" class="space-y-4" data-submit-url=(self.form.action()) {
                @for input in self.form.inputs() {
                    (InputField::from(input))
                }

                (Button::submit("Send")
                    .id(SUBMIT_BUTTON_ID)
                    .disabled(self.controls.submit_disabled)
                    .full_width(true))

                div id=(SUBMIT_LOADER_ID) style=(loader_style) class="text-center text-gray-500" { "Sending..." }
            }

            div id=(RESULT_CONTAINER_ID) class=(result.classes.to_string()) { (result.content) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormData;

    #[test]
    fn test_input_field_renders_model_classes() {
        let mut classes = ClassList::default();
        classes.add("error");

        let markup = InputField::new("email")
            .value("bad@gmail.com")
            .classes(classes)
            .render()
            .into_string();

        assert!(markup.contains(r#"name="email""#));
        assert!(markup.contains(r#"value="bad@gmail.com""#));
        assert!(markup.contains(r#"class="error w-full"#));
    }

    #[test]
    fn test_form_view_contains_every_part() {
        let mut form = InputForm::new("http://localhost:3001/success.json");
        form.set_data(&FormData {
            fio: "Ivanov Ivan Ivanovich".to_string(),
            ..FormData::default()
        });

        let markup = FormView::new(&form, "/").render().into_string();

        assert!(markup.contains(r#"id="myForm""#));
        assert!(markup.contains(r#"data-submit-url="http://localhost:3001/success.json""#));
        assert!(markup.contains(r#"name="fio""#));
        assert!(markup.contains(r#"name="email""#));
        assert!(markup.contains(r#"name="phone""#));
        assert!(markup.contains(r#"value="Ivanov Ivan Ivanovich""#));
        assert!(markup.contains(r#"id="submitButton""#));
        assert!(!markup.contains(" disabled>"));
        assert!(markup.contains(r#"style="display: none""#));
        assert!(markup.contains(r#"id="resultContainer""#));
    }

    #[test]
    fn test_form_view_in_flight_controls() {
        let form = InputForm::new("/submit");
        let in_flight = Controls {
            submit_disabled: true,
            loader_visible: true,
        };

        let markup = FormView::new(&form, "/")
            .with_controls(in_flight)
            .render()
            .into_string();

        assert!(markup.contains(" disabled>"));
        assert!(markup.contains(r#"style="display: block""#));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut form = InputForm::new("/submit");
        form.set_data(&FormData {
            fio: r#""><script>"#.to_string(),
            ..FormData::default()
        });

        let markup = FormView::new(&form, "/").render().into_string();
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&quot;&gt;&lt;script&gt;"));
    }
}
