//! `{name}` token substitution for chatbot templates.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::entity::Student;
use crate::settings::Settings;

/// Built-in token for the student's name.
pub const STUDENT_TOKEN: &str = "aluno";
/// Built-in token for the studio's name.
pub const STUDIO_TOKEN: &str = "estudio";

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("token pattern is a valid regex"));

/// Replaces `{name}` tokens in `template`.
///
/// `{aluno}` and `{estudio}` take precedence over caller variables with the
/// same name. Unknown tokens stay in place. Substitution is a single pass:
/// values are inserted literally and never scanned again.
pub fn replace_variables(
    template: &str,
    student: &Student,
    settings: &Settings,
    variables: &BTreeMap<String, String>,
) -> String {
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match name {
                STUDENT_TOKEN => student.name.clone(),
                STUDIO_TOKEN => settings.app_name.clone(),
                other => variables
                    .get(other)
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string()),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_builtins_and_variables() {
        let student = &seed::students()[0];
        let settings = Settings::default();
        let text = replace_variables(
            "Olá {aluno}! Sua aula no {estudio} é {data}. Até {data}!",
            student,
            &settings,
            &vars(&[("data", "amanhã")]),
        );
        assert_eq!(
            text,
            format!(
                "Olá {}! Sua aula no Meu Estúdio é amanhã. Até amanhã!",
                student.name
            )
        );
    }

    #[test]
    fn test_unknown_tokens_are_kept() {
        let student = &seed::students()[0];
        let text = replace_variables("Valor: {valor}", student, &Settings::default(), &vars(&[]));
        assert_eq!(text, "Valor: {valor}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let student = &seed::students()[0];
        let text = replace_variables(
            "{a}",
            student,
            &Settings::default(),
            &vars(&[("a", "{aluno}")]),
        );
        assert_eq!(text, "{aluno}");
    }

    #[test]
    fn test_builtin_wins_over_variable() {
        let student = &seed::students()[0];
        let text = replace_variables(
            "{aluno}",
            student,
            &Settings::default(),
            &vars(&[("aluno", "someone else")]),
        );
        assert_eq!(text, student.name);
    }
}
