//! Monarch-style grammar export
//!
//! Browser editors that run their own Monarch tokenizer take the definition
//! as a JSON object. This adapter renders a [`LanguageDefinition`] in that
//! shape; the rule tables stay the single source of truth.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::Result;
use crate::lexer::{Action, BracketPair, LanguageDefinition, RuleSpec, TokenKind, Transition};

/// Monarch language object
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonarchGrammar {
    pub default_token: String,
    pub token_postfix: String,
    pub ignore_case: bool,
    pub keywords: Vec<String>,
    pub operators: Vec<String>,
    pub symbols: String,
    pub brackets: Vec<BracketPair>,
    pub tokenizer: BTreeMap<String, Vec<Value>>,
}

impl MonarchGrammar {
    pub fn from_definition(definition: &LanguageDefinition) -> Self {
        let tokenizer = definition
            .declarations()
            .iter()
            .map(|(name, rules)| (name.clone(), rules.iter().map(render_rule).collect()))
            .collect();

        Self {
            default_token: TokenKind::Unstyled.monarch_name().to_string(),
            token_postfix: format!(".{}", definition.id()),
            ignore_case: definition.ignore_case(),
            keywords: definition.keywords().to_vec(),
            operators: definition.operators().to_vec(),
            symbols: definition.symbols().to_string(),
            brackets: definition.brackets().to_vec(),
            tokenizer,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn render_rule(rule: &RuleSpec) -> Value {
    match rule {
        RuleSpec::Include(state) => json!({ "include": format!("@{state}") }),
        RuleSpec::Match {
            pattern,
            action,
            transition,
        } => json!([pattern, render_action(*action, transition)]),
    }
}

fn render_action(action: Action, transition: &Transition) -> Value {
    let token = match action {
        Action::Emit(kind) => json!(kind.monarch_name()),
        Action::Keywords { hit, miss } => json!({
            "cases": { "@keywords": hit.monarch_name(), "@default": miss.monarch_name() }
        }),
        Action::Operators { hit, miss } => json!({
            "cases": { "@operators": hit.monarch_name(), "@default": miss.monarch_name() }
        }),
    };

    match transition {
        Transition::None => token,
        Transition::Push(state) => json!({ "token": token, "next": format!("@{state}") }),
        Transition::Pop => json!({ "token": token, "next": "@pop" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Dialect;

    #[test]
    fn test_klogs_export() {
        let definition = Dialect::Klogs.definition().unwrap();
        let grammar = MonarchGrammar::from_definition(&definition);
        let value = serde_json::to_value(&grammar).unwrap();

        assert_eq!(value["tokenPostfix"], ".klogs");
        assert_eq!(value["ignoreCase"], true);
        assert_eq!(value["tokenizer"]["root"][0]["include"], "@whitespace");
        assert_eq!(value["tokenizer"]["root"][1][1], "invalid");
        assert_eq!(
            value["tokenizer"]["root"][3][1]["cases"]["@keywords"],
            "keyword"
        );
        assert_eq!(value["tokenizer"]["root"][5][0], "@symbols");
        assert_eq!(value["tokenizer"]["root"][6][1]["next"], "@string");
        assert_eq!(value["tokenizer"]["string"][2][1]["next"], "@pop");
    }

    #[test]
    fn test_export_is_valid_json() {
        for dialect in Dialect::ALL {
            let definition = dialect.definition().unwrap();
            let text = MonarchGrammar::from_definition(&definition)
                .to_json_pretty()
                .unwrap();
            let parsed: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(parsed["keywords"].as_array().unwrap().len(), definition.keywords().len());
        }
    }
}
