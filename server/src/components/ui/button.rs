use maud::{html, Markup, Render};

pub struct Button {
    pub text: String,
    pub id: Option<String>,
    pub button_type: String,
    pub disabled: bool,
    pub full_width: bool,
}

impl Button {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            id: None,
            button_type: "button".to_string(),
            disabled: false,
            full_width: false,
        }
    }

    pub fn submit(text: &str) -> Self {
        Self::new(text).button_type("submit")
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn button_type(mut self, button_type: &str) -> Self {
        self.button_type = button_type.to_string();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }
}

impl Render for Button {
    fn render(&self) -> Markup {
        let width_class = if self.full_width { "w-full" } else { "" };
        let classes = format!(
            "bg-indigo-600 hover:bg-indigo-700 text-white {width_class} py-2 px-4 font-medium rounded-lg shadow-sm disabled:opacity-50 disabled:cursor-not-allowed"
        );

        html! {
            button type=(self.button_type) id=[self.id.as_deref()] class=(classes) disabled[self.disabled] {
                (self.text)
            }
        }
    }
}
