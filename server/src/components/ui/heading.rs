use maud::{html, Markup, Render};

pub struct Heading {
    pub text: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingLevel {
    H1,
    H2,
}

impl Heading {
    pub fn new(text: &str, level: HeadingLevel) -> Self {
        Self {
            text: text.to_string(),
            level,
        }
    }

    pub fn h1(text: &str) -> Self {
        Self::new(text, HeadingLevel::H1)
    }

    pub fn h2(text: &str) -> Self {
        Self::new(text, HeadingLevel::H2)
    }

    fn classes_for_level(&self) -> &'static str {
        match self.level {
            HeadingLevel::H1 => "text-3xl font-bold mb-4 text-gray-800",
            HeadingLevel::H2 => "text-lg font-semibold mt-6 mb-2 text-gray-700",
        }
    }
}

impl Render for Heading {
    fn render(&self) -> Markup {
        let classes = self.classes_for_level();

        match self.level {
            HeadingLevel::H1 => html! { h1 class=(classes) { (self.text) } },
            HeadingLevel::H2 => html! { h2 class=(classes) { (self.text) } },
        }
    }
}
