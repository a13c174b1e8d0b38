/// A builder for filling `{{KEY}}` placeholders in prompts and templates.
pub struct PromptRenderer<'a> {
    template: &'a str,
    replacements: Vec<(&'a str, String)>,
}

impl<'a> PromptRenderer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            replacements: Vec::new(),
        }
    }

    pub fn set(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.replacements.push((key, value.into()));
        self
    }

    pub fn render(self) -> String {
        let mut result = self.template.to_string();
        for (key, value) in self.replacements {
            result = result.replace(key, &value);
        }

        if let Some(start) = result.find("{{")
            && let Some(end) = result[start..].find("}}")
        {
            let placeholder = &result[start..start + end + 2];
            tracing::error!("Unreplaced placeholder in rendered output: {}", placeholder);
        }

        result
    }
}

/// System message sent with every chat request.
pub const SYSTEM_PROMPT: &str = "You are GenDevCli. Always reply in valid JSON.";

pub const DOCKERFILE_TASK: &str = "generate_dockerfile";
pub const DOCKERFILE_INSTRUCTIONS: &str = "Generate an optimized Dockerfile for a Node.js application. Include multi-stage build if appropriate.";

pub const TESTGEN_TASK: &str = "generate_test";
pub const TESTGEN_FRAMEWORK: &str = "jest";
pub const TESTGEN_INSTRUCTIONS: &str = "Generate comprehensive unit tests with multiple test cases covering edge cases and error conditions. Return only the test code in your response.";
