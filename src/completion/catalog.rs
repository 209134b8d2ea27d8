//! Static completion catalogs
//!
//! Order is fixed: operators first, then logical operators or keywords. The
//! host filters by the typed prefix; nothing here ranks or de-duplicates.

use super::item::{CompletionItem, CompletionKind};
use crate::lexer::Dialect;
use crate::lexer::dialect::{klogs, mongodb, signalsciences};

/// Static suggestions of `dialect`
pub fn catalog(dialect: Dialect) -> Vec<CompletionItem> {
    match dialect {
        Dialect::Klogs => klogs_catalog(),
        Dialect::MongoDb => mongodb_catalog(),
        Dialect::SignalSciences => signalsciences_catalog(),
    }
}

fn klogs_catalog() -> Vec<CompletionItem> {
    let operators = klogs::OPERATORS
        .iter()
        .map(|op| CompletionItem::plain(*op, CompletionKind::Operator));
    let logical = klogs::LOGICAL_OPERATORS
        .iter()
        .chain(klogs::LOGICAL_OPERATORS_UPPER)
        .map(|op| CompletionItem::plain(*op, CompletionKind::Variable));
    operators.chain(logical).collect()
}

/// `$` is a placeholder marker in the host's snippet syntax, so operators are
/// inserted with a leading backslash.
fn mongodb_catalog() -> Vec<CompletionItem> {
    let operators = mongodb::OPERATORS
        .iter()
        .map(|op| CompletionItem::new(*op, format!("\\{op}"), CompletionKind::Operator));
    let keywords = mongodb::KEYWORDS
        .iter()
        .map(|kw| CompletionItem::plain(*kw, CompletionKind::Variable));
    operators.chain(keywords).collect()
}

fn signalsciences_catalog() -> Vec<CompletionItem> {
    let operators = signalsciences::OPERATORS
        .iter()
        .map(|op| CompletionItem::plain(*op, CompletionKind::Operator));
    let keywords = signalsciences::KEYWORDS
        .iter()
        .map(|kw| CompletionItem::plain(*kw, CompletionKind::Variable));
    operators.chain(keywords).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_klogs_catalog_shape() {
        let items = catalog(Dialect::Klogs);
        assert_eq!(
            items.len(),
            klogs::OPERATORS.len() + klogs::LOGICAL_OPERATORS.len() * 2
        );

        let operators = &items[..klogs::OPERATORS.len()];
        assert!(operators.iter().all(|i| i.kind == CompletionKind::Operator));
        assert_eq!(operators[0].label, "=");

        let logical = &items[klogs::OPERATORS.len()..];
        assert!(logical.iter().all(|i| i.kind == CompletionKind::Variable));
        assert_eq!(logical[0].insert_text, "_and_");
        assert_eq!(logical[klogs::LOGICAL_OPERATORS.len()].insert_text, "_AND_");
    }

    #[test]
    fn test_mongodb_operator_insertion_is_escaped() {
        let items = catalog(Dialect::MongoDb);
        let eq = items.iter().find(|i| i.label == "$eq").unwrap();
        assert_eq!(eq.insert_text, "\\$eq");
        assert_eq!(eq.kind, CompletionKind::Operator);

        let null = items.iter().find(|i| i.label == "null").unwrap();
        assert_eq!(null.insert_text, "null");
        assert_eq!(null.kind, CompletionKind::Variable);
    }

    #[test]
    fn test_signalsciences_catalog() {
        let items = catalog(Dialect::SignalSciences);
        assert_eq!(
            items.len(),
            signalsciences::OPERATORS.len() + signalsciences::KEYWORDS.len()
        );
        assert!(items.iter().any(|i| i.label == "useragent"));
    }
}
