use std::fmt;
use thiserror::Error;

/// The answer that tells `make_ndx` to write the index file and exit.
pub const QUIT_DIRECTIVE: &str = "q";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScriptError {
    #[error("Scripted answer {index} is empty")]
    EmptyAnswer { index: usize },

    #[error("Scripted answer {index} contains a line break: {answer:?}")]
    MultiLineAnswer { index: usize, answer: String },
}

/// An ordered list of answers fed to an interactive toolkit prompt.
///
/// Each answer occupies exactly one line of standard input. The toolkit reads
/// the answers in prompt order, so an answer spanning several lines would
/// silently shift every later selection; such answers are rejected up front.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputScript {
    answers: Vec<String>,
}

impl InputScript {
    /// Builds a script from answers given in prompt order.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if any answer is empty or spans several lines.
    pub fn new<I, S>(answers: I) -> Result<Self, ScriptError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let answers: Vec<String> = answers.into_iter().map(Into::into).collect();
        for (index, answer) in answers.iter().enumerate() {
            if answer.trim().is_empty() {
                return Err(ScriptError::EmptyAnswer { index });
            }
            if answer.contains(['\n', '\r']) {
                return Err(ScriptError::MultiLineAnswer {
                    index,
                    answer: answer.clone(),
                });
            }
        }
        Ok(Self { answers })
    }

    /// Builds the script for an index-building session: one selection
    /// expression followed by [`QUIT_DIRECTIVE`].
    pub fn index_selection(selection: &str) -> Result<Self, ScriptError> {
        Self::new([selection, QUIT_DIRECTIVE])
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Renders the complete standard input, one newline-terminated line per answer.
    pub fn render(&self) -> String {
        self.answers.iter().fold(String::new(), |mut acc, answer| {
            acc.push_str(answer);
            acc.push('\n');
            acc
        })
    }
}

/// A single external-tool invocation: executable, arguments, and the optional
/// scripted standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub input: Option<InputScript>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            input: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn input(mut self, script: InputScript) -> Self {
        self.input = Some(script);
        self
    }

    /// Short label used in progress lines, e.g. `gmx_mpi trjconv`.
    pub fn label(&self) -> String {
        match self.args.first() {
            Some(sub) => format!("{} {}", self.program, sub),
            None => self.program.clone(),
        }
    }

    pub fn rendered_input(&self) -> Option<String> {
        self.input.as_ref().map(InputScript::render)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
