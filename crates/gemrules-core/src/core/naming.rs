//! The per-protein naming contract.
//!
//! Every parameter and rule name the generators create is derived here from
//! the gene, mRNA, protein and transcription-factor names. The strings must
//! stay bit-for-bit stable: hand-written rule files use the same convention,
//! and a collision would silently merge two rate constants.

use phf::{Set, phf_set};

pub const RNA_POLYMERASE: &str = "RNAp";
pub const EIF4E: &str = "eIF4E";
pub const RIBOSOME_40S: &str = "_40S";
pub const RIBOSOME_60S: &str = "_60S";

/// Words BNGL reserves for block and action syntax.
static RESERVED_WORDS: Set<&'static str> = phf_set! {
    "begin", "end", "model", "parameters", "molecule", "types", "seed",
    "species", "reaction", "rules", "observables", "functions",
    "compartments", "actions", "Molecules", "Species", "include", "exclude",
};

/// Whether `name` can be used as a BNGL identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.contains(name)
}

pub fn gene_name(protein: &str) -> String {
    format!("g_{}", protein)
}

pub fn mrna_name(protein: &str) -> String {
    format!("mRNA_{}", protein)
}

// --- Transcription ---

/// `kf_`, `kr_`, `kcat_` names for basal RNA polymerase recruitment.
pub fn basal_rate_names(gene: &str) -> [String; 3] {
    ["kf", "kr", "kcat"].map(|k| format!("{}_{}_{}", k, gene, RNA_POLYMERASE))
}

pub fn basal_binding_rule(gene: &str) -> String {
    format!("{}_binds_{}", gene, RNA_POLYMERASE)
}

pub fn basal_transcription_rule(gene: &str) -> String {
    format!("{}_{}_transcribes", gene, RNA_POLYMERASE)
}

pub fn mrna_decay_rate(mrna: &str) -> String {
    format!("kdeg_{}", mrna)
}

pub fn mrna_decay_rule(mrna: &str) -> String {
    format!("{}_degrades", mrna)
}

/// `kon_`, `koff_` names for a transcription factor binding the gene.
pub fn factor_binding_rate_names(gene: &str, factor: &str) -> [String; 2] {
    ["kon", "koff"].map(|k| format!("{}_{}_{}", k, gene, factor))
}

pub fn factor_binding_rule(gene: &str, factor: &str) -> String {
    format!("{}_binds_{}", gene, factor)
}

/// `kf_`, `kr_`, `kcat_` names for polymerase recruitment to a factor-bound gene.
pub fn factor_rate_names(gene: &str, factor: &str) -> [String; 3] {
    ["kf", "kr", "kcat"].map(|k| format!("{}_{}_{}_{}", k, gene, factor, RNA_POLYMERASE))
}

pub fn factor_polymerase_rule(gene: &str, factor: &str) -> String {
    format!("{}_{}_binds_{}", gene, factor, RNA_POLYMERASE)
}

pub fn factor_transcription_rule(gene: &str, factor: &str) -> String {
    format!("{}_{}_{}_transcribes", gene, factor, RNA_POLYMERASE)
}

// --- Translation ---

/// The three reversible initiation steps, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitiationStep {
    CapBinding,
    SmallSubunitBinding,
    LargeSubunitJoining,
}

impl InitiationStep {
    pub const ALL: [InitiationStep; 3] = [
        Self::CapBinding,
        Self::SmallSubunitBinding,
        Self::LargeSubunitJoining,
    ];

    pub fn rule_name(self, mrna: &str) -> String {
        match self {
            Self::CapBinding => format!("{}_binds_{}", mrna, EIF4E),
            Self::SmallSubunitBinding => format!("{}_{}_binds_40S", mrna, EIF4E),
            Self::LargeSubunitJoining => format!("{}_{}_40S_binds_60S", mrna, EIF4E),
        }
    }

    /// `kf_`/`kr_` prefixed onto the rule name.
    pub fn rate_names(self, mrna: &str) -> [String; 2] {
        let rule = self.rule_name(mrna);
        ["kf", "kr"].map(|k| format!("{}_{}", k, rule))
    }
}

pub fn release_rate(protein: &str) -> String {
    format!("k_release_{}", protein)
}

pub fn release_rule(mrna: &str) -> String {
    format!("{}_{}_40S_60S_releases_{}", mrna, EIF4E, EIF4E)
}

pub fn elongation_rate(protein: &str) -> String {
    format!("k_elongate_{}", protein)
}

pub fn elongation_rule(mrna: &str) -> String {
    format!("{}_40S_60S_elongates", mrna)
}

pub fn termination_rate(protein: &str) -> String {
    format!("k_terminate_{}", protein)
}

pub fn termination_rule(mrna: &str) -> String {
    format!("{}_40S_60S_translates", mrna)
}

pub fn protein_decay_rate(protein: &str) -> String {
    format!("k_deg_{}", protein)
}

pub fn protein_decay_rule(protein: &str) -> String {
    format!("{}_degrades", protein)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_follow_bngl_rules() {
        assert!(is_valid_identifier("_40S"));
        assert!(is_valid_identifier("mRNA_PSA"));
        assert!(is_valid_identifier("AR_p_DHT_2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("4EBP1"));
        assert!(!is_valid_identifier("g-PSA"));
        assert!(!is_valid_identifier("end"));
        assert!(!is_valid_identifier("species"));
    }

    #[test]
    fn transcription_names_match_convention() {
        assert_eq!(gene_name("PSA"), "g_PSA");
        assert_eq!(mrna_name("PSA"), "mRNA_PSA");
        assert_eq!(
            basal_rate_names("g_PSA"),
            ["kf_g_PSA_RNAp", "kr_g_PSA_RNAp", "kcat_g_PSA_RNAp"]
        );
        assert_eq!(basal_binding_rule("g_PSA"), "g_PSA_binds_RNAp");
        assert_eq!(basal_transcription_rule("g_PSA"), "g_PSA_RNAp_transcribes");
        assert_eq!(mrna_decay_rate("mRNA_PSA"), "kdeg_mRNA_PSA");
        assert_eq!(mrna_decay_rule("mRNA_PSA"), "mRNA_PSA_degrades");
        assert_eq!(
            factor_binding_rate_names("g_CycD", "ETS_p"),
            ["kon_g_CycD_ETS_p", "koff_g_CycD_ETS_p"]
        );
        assert_eq!(factor_binding_rule("g_CycD", "ETS_p"), "g_CycD_binds_ETS_p");
        assert_eq!(
            factor_rate_names("g_CycD", "ETS_p"),
            [
                "kf_g_CycD_ETS_p_RNAp",
                "kr_g_CycD_ETS_p_RNAp",
                "kcat_g_CycD_ETS_p_RNAp"
            ]
        );
        assert_eq!(
            factor_polymerase_rule("g_CycD", "ETS_p"),
            "g_CycD_ETS_p_binds_RNAp"
        );
        assert_eq!(
            factor_transcription_rule("g_CycD", "ETS_p"),
            "g_CycD_ETS_p_RNAp_transcribes"
        );
    }

    #[test]
    fn translation_names_match_convention() {
        let mrna = "mRNA_CycD";
        assert_eq!(
            InitiationStep::CapBinding.rate_names(mrna),
            ["kf_mRNA_CycD_binds_eIF4E", "kr_mRNA_CycD_binds_eIF4E"]
        );
        assert_eq!(
            InitiationStep::SmallSubunitBinding.rule_name(mrna),
            "mRNA_CycD_eIF4E_binds_40S"
        );
        assert_eq!(
            InitiationStep::LargeSubunitJoining.rate_names(mrna)[0],
            "kf_mRNA_CycD_eIF4E_40S_binds_60S"
        );
        assert_eq!(release_rule(mrna), "mRNA_CycD_eIF4E_40S_60S_releases_eIF4E");
        assert_eq!(elongation_rule(mrna), "mRNA_CycD_40S_60S_elongates");
        assert_eq!(termination_rule(mrna), "mRNA_CycD_40S_60S_translates");
        assert_eq!(release_rate("CycD"), "k_release_CycD");
        assert_eq!(elongation_rate("CycD"), "k_elongate_CycD");
        assert_eq!(termination_rate("CycD"), "k_terminate_CycD");
        assert_eq!(protein_decay_rate("CycD"), "k_deg_CycD");
        assert_eq!(protein_decay_rule("CycD"), "CycD_degrades");
    }
}
