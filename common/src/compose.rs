//! テキスト合成
//!
//! Fato Gerador の3フィールドを1つのテキストにまとめる。

use crate::types::CauseRecord;

/// `"{motivo}. {natureza}. {name}"` 形式で連結
pub fn compose_text(reason: &str, nature: &str, name: &str) -> String {
    format!("{}. {}. {}", reason, nature, name)
}

impl CauseRecord {
    pub fn composed_text(&self) -> String {
        compose_text(&self.reason, &self.nature, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_text() {
        assert_eq!(compose_text("Atraso", "Entrega", "Pedido X"), "Atraso. Entrega. Pedido X");
    }

    #[test]
    fn test_compose_text_keeps_empty_fields() {
        assert_eq!(compose_text("Atraso", "Entrega", ""), "Atraso. Entrega. ");
    }

    #[test]
    fn test_cause_composed_text() {
        let cause = CauseRecord {
            row: 0,
            reason: "Cobrança".into(),
            nature: "Fatura".into(),
            name: "Pedido Y".into(),
        };
        assert_eq!(cause.composed_text(), "Cobrança. Fatura. Pedido Y");
    }
}
