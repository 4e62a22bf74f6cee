//! Prompt templates with placeholder substitution.
//!
//! Every generator carries a template split into a main half (the
//! instructions) and a context half (the variable bindings). Either half can
//! be replaced at runtime without touching the other.

/// A two-part prompt template rendered by `{placeholder}` substitution.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    main: String,
    context: String,
}

impl PromptTemplate {
    /// Create a template from its main and context halves.
    pub fn new(main: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            context: context.into(),
        }
    }

    /// Replace the main (instruction) half.
    pub fn set_main(&mut self, main: impl Into<String>) {
        self.main = main.into();
    }

    /// Replace the context (variable bindings) half.
    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    /// The raw template string: main half, newline, context half.
    pub fn template(&self) -> String {
        format!("{}\n{}", self.main, self.context)
    }

    /// Render the template, substituting each `{key}` with its value.
    ///
    /// Unknown placeholders are left in place; extra variables are ignored.
    pub fn render(&self, vars: &[(&str, String)]) -> String {
        let mut text = self.template();
        for (key, value) in vars {
            text = text.replace(&format!("{{{}}}", key), value);
        }
        text
    }
}
