use crate::error::TaskError;
use tracing::debug;

/// Ordered sequence of tokenized command argument vectors. Produced once
/// per execution and consumed in order; the wrapper executable is not part
/// of the plan, the executor inserts it at spawn time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    commands: Vec<Vec<String>>,
}

impl ExecutionPlan {
    pub fn commands(&self) -> &[Vec<String>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl IntoIterator for ExecutionPlan {
    type Item = Vec<String>;
    type IntoIter = std::vec::IntoIter<Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

/// Build an execution plan from raw multi-line command text.
///
/// Input is split on carriage returns and line feeds; each line is trimmed
/// and blank lines are dropped. The common-options string is prepended to
/// every remaining line before tokenization, so common flags apply to every
/// command uniformly.
pub fn plan(raw_commands: &str, common_options: &str) -> Result<ExecutionPlan, TaskError> {
    let prefix = if common_options.is_empty() {
        String::new()
    } else if common_options.ends_with(' ') {
        common_options.to_string()
    } else {
        format!("{} ", common_options)
    };

    let mut commands = Vec::new();
    for line in raw_commands.split(['\r', '\n']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        commands.push(tokenize(&format!("{}{}", prefix, line))?);
    }

    debug!("Planned {} wrapper command(s)", commands.len());
    Ok(ExecutionPlan { commands })
}

/// Shell-style word splitting: whitespace separates tokens, single quotes
/// preserve their contents literally, double quotes allow backslash escapes,
/// a backslash outside quotes escapes the next character.
fn tokenize(line: &str) -> Result<Vec<String>, TaskError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => {
                            return Err(TaskError::MalformedCommand(format!(
                                "Unbalanced single quote in '{}'",
                                line
                            )))
                        }
                    }
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => {
                                return Err(TaskError::MalformedCommand(format!(
                                    "Trailing escape in '{}'",
                                    line
                                )))
                            }
                        },
                        Some(c) => current.push(c),
                        None => {
                            return Err(TaskError::MalformedCommand(format!(
                                "Unbalanced double quote in '{}'",
                                line
                            )))
                        }
                    }
                }
            }
            '\\' => {
                in_token = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => {
                        return Err(TaskError::MalformedCommand(format!(
                            "Trailing escape in '{}'",
                            line
                        )))
                    }
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
