//! Reply suppression policy.
//!
//! Automated senders ("no-reply" addresses) get only the formal variant.
//! Everyone else gets all three, always in the same order.

use serde::{Deserialize, Serialize};

use super::variants::ReplyVariantSet;

/// Marker searched for in the justification text. The quoted form
/// (`'no-reply'`) contains it, so one substring check covers both.
pub const NO_REPLY_MARKER: &str = "no-reply";

/// A variant ready for display, e.g. `("formal", "Olá! ...")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledVariant {
    pub label: String,
    pub text: String,
}

impl LabeledVariant {
    fn new(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            text: text.to_string(),
        }
    }
}

/// Whether the justification flags the sender as a no-reply address.
pub fn is_no_reply(justification: &str) -> bool {
    justification.to_lowercase().contains(NO_REPLY_MARKER)
}

/// Pick the variants to expose for a result with this justification.
pub fn select_variants(justification: &str, variants: &ReplyVariantSet) -> Vec<LabeledVariant> {
    if is_no_reply(justification) {
        return vec![LabeledVariant::new("formal", &variants.formal)];
    }

    vec![
        LabeledVariant::new("informal", &variants.informal),
        LabeledVariant::new("formal", &variants.formal),
        LabeledVariant::new("professional", &variants.professional),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replies::variants::generate_variants;

    fn labels(selected: &[LabeledVariant]) -> Vec<&str> {
        selected.iter().map(|v| v.label.as_str()).collect()
    }

    #[test]
    fn no_reply_sender_gets_formal_only() {
        let variants = generate_variants("Olá! Como posso ajudar você?");
        let selected = select_variants("remetente 'no-reply'", &variants);

        assert_eq!(labels(&selected), ["formal"]);
        assert_eq!(selected[0].text, variants.formal);
        assert_eq!(selected[0].text, "Olá! Como posso ajudar você? ");
    }

    #[test]
    fn formal_only_variant_is_cleaned() {
        let variants = generate_variants("Oi! Mensagem recebida, vc não precisa responder 😊");
        let selected = select_variants(
            "E-mail automático identificado como 'no-reply', sem necessidade de resposta.",
            &variants,
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(
            selected[0].text,
            "Olá! Mensagem recebida, você não precisa responder "
        );
    }

    #[test]
    fn unquoted_and_uppercase_markers() {
        assert!(is_no_reply("sender is no-reply@bank.com"));
        assert!(is_no_reply("Remetente NO-REPLY"));
        assert!(!is_no_reply("noreply without hyphen"));
        assert!(!is_no_reply("Pedido de status de chamado."));
    }

    #[test]
    fn regular_sender_gets_all_three_in_order() {
        let variants = generate_variants("Vou verificar o status e retorno em breve.");
        let selected = select_variants("Pedido de status de chamado.", &variants);

        assert_eq!(labels(&selected), ["informal", "formal", "professional"]);
        assert_eq!(selected[0].text, variants.informal);
        assert_eq!(selected[1].text, variants.formal);
        assert_eq!(selected[2].text, variants.professional);
    }

    #[test]
    fn empty_justification_gets_all_three() {
        let variants = generate_variants("Ok.");
        assert_eq!(select_variants("", &variants).len(), 3);
    }
}
