use crate::core::error::{ModelError, SymbolKind};
use crate::core::models::ids::MonomerId;
use crate::core::models::model::Model;
use crate::core::models::pattern::MonomerPattern;
use crate::core::naming;

pub const GENE_POLYMERASE_SITE: &str = "rnap";
pub const GENE_FACTOR_SITE: &str = "tf";
pub const POLYMERASE_GENE_SITE: &str = "gene";
pub const FACTOR_GENE_SITE: &str = "gene";

pub const MRNA_CAP_SITE: &str = "eif4e";
pub const MRNA_RIBOSOME_SITE: &str = "_40s";
pub const MRNA_ELONGATION_SITE: &str = "elong";
pub const ELONGATION_IDLE: &str = "i";
pub const ELONGATION_ACTIVE: &str = "a";

pub const EIF4E_MRNA_SITE: &str = "mrna_4ebp1";
pub const SMALL_SUBUNIT_MRNA_SITE: &str = "mrna";
pub const SMALL_SUBUNIT_LARGE_SITE: &str = "_60s";
pub const LARGE_SUBUNIT_SITE: &str = "_40s";

/// The monomers transcription of one protein operates on.
///
/// Resolving a unit checks every monomer, site and state value the
/// transcription generator will reference, so generation itself never fails
/// on a missing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinTranscriptionUnit {
    pub gene: MonomerId,
    pub mrna: MonomerId,
    pub rna_polymerase: MonomerId,
    /// Gene sites a transcription factor may occupy (`tf`, `tf1`, `tf2`, ...),
    /// in declaration order.
    pub factor_slots: Vec<String>,
}

impl ProteinTranscriptionUnit {
    /// Resolves `g_<protein>`, `mRNA_<protein>` and `RNAp` by name.
    pub fn resolve(model: &Model, protein: &str) -> Result<Self, ModelError> {
        let gene = model.monomer_id(&naming::gene_name(protein))?;
        let mrna = model.monomer_id(&naming::mrna_name(protein))?;
        let rna_polymerase = model.monomer_id(naming::RNA_POLYMERASE)?;
        Self::new(model, gene, mrna, rna_polymerase)
    }

    pub fn new(
        model: &Model,
        gene: MonomerId,
        mrna: MonomerId,
        rna_polymerase: MonomerId,
    ) -> Result<Self, ModelError> {
        require_bond_site(model, gene, GENE_POLYMERASE_SITE)?;
        require_bond_site(model, rna_polymerase, POLYMERASE_GENE_SITE)?;
        require_mrna_sites(model, mrna)?;

        let gene_type = model.require_monomer(gene)?;
        let factor_slots: Vec<String> = gene_type
            .sites()
            .iter()
            .filter(|site| site.is_bond() && is_factor_slot(&site.name))
            .map(|site| site.name.clone())
            .collect();
        if factor_slots.is_empty() {
            return Err(ModelError::missing(
                SymbolKind::Site,
                format!("{}.{}", gene_type.name, GENE_FACTOR_SITE),
            ));
        }

        Ok(Self {
            gene,
            mrna,
            rna_polymerase,
            factor_slots,
        })
    }
}

/// The monomers translation of one protein operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinTranslationUnit {
    pub mrna: MonomerId,
    pub protein: MonomerId,
    pub eif4e: MonomerId,
    pub small_subunit: MonomerId,
    pub large_subunit: MonomerId,
}

impl ProteinTranslationUnit {
    /// Resolves `mRNA_<protein>`, `<protein>` and the shared translation
    /// machinery (`eIF4E`, `_40S`, `_60S`) by name.
    pub fn resolve(model: &Model, protein: &str) -> Result<Self, ModelError> {
        let mrna = model.monomer_id(&naming::mrna_name(protein))?;
        let protein_id = model.monomer_id(protein)?;
        let eif4e = model.monomer_id(naming::EIF4E)?;
        let small_subunit = model.monomer_id(naming::RIBOSOME_40S)?;
        let large_subunit = model.monomer_id(naming::RIBOSOME_60S)?;
        Self::new(model, mrna, protein_id, eif4e, small_subunit, large_subunit)
    }

    pub fn new(
        model: &Model,
        mrna: MonomerId,
        protein: MonomerId,
        eif4e: MonomerId,
        small_subunit: MonomerId,
        large_subunit: MonomerId,
    ) -> Result<Self, ModelError> {
        require_mrna_sites(model, mrna)?;
        model.require_monomer(protein)?;
        require_bond_site(model, eif4e, EIF4E_MRNA_SITE)?;
        require_bond_site(model, small_subunit, SMALL_SUBUNIT_MRNA_SITE)?;
        require_bond_site(model, small_subunit, SMALL_SUBUNIT_LARGE_SITE)?;
        require_bond_site(model, large_subunit, LARGE_SUBUNIT_SITE)?;

        Ok(Self {
            mrna,
            protein,
            eif4e,
            small_subunit,
            large_subunit,
        })
    }
}

/// The free, initiation-ready mRNA shape: nothing bound, elongation idle.
pub(crate) fn free_mrna(mrna: MonomerId) -> MonomerPattern {
    MonomerPattern::new(mrna)
        .free(MRNA_CAP_SITE)
        .free(MRNA_RIBOSOME_SITE)
        .state(MRNA_ELONGATION_SITE, ELONGATION_IDLE)
}

fn is_factor_slot(site: &str) -> bool {
    site.strip_prefix(GENE_FACTOR_SITE)
        .is_some_and(|suffix| suffix.chars().all(|c| c.is_ascii_digit()))
}

fn require_mrna_sites(model: &Model, mrna: MonomerId) -> Result<(), ModelError> {
    require_bond_site(model, mrna, MRNA_CAP_SITE)?;
    require_bond_site(model, mrna, MRNA_RIBOSOME_SITE)?;
    require_state(model, mrna, MRNA_ELONGATION_SITE, ELONGATION_IDLE)?;
    require_state(model, mrna, MRNA_ELONGATION_SITE, ELONGATION_ACTIVE)
}

fn require_bond_site(model: &Model, id: MonomerId, site: &str) -> Result<(), ModelError> {
    let monomer = model.require_monomer(id)?;
    if monomer.has_bond_site(site) {
        Ok(())
    } else {
        Err(ModelError::missing(
            SymbolKind::Site,
            format!("{}.{}", monomer.name, site),
        ))
    }
}

fn require_state(model: &Model, id: MonomerId, site: &str, value: &str) -> Result<(), ModelError> {
    let monomer = model.require_monomer(id)?;
    match monomer.site(site) {
        Some(s) if s.has_state(value) => Ok(()),
        Some(_) => Err(ModelError::missing(
            SymbolKind::State,
            format!("{}.{}~{}", monomer.name, site, value),
        )),
        None => Err(ModelError::missing(
            SymbolKind::Site,
            format!("{}.{}", monomer.name, site),
        )),
    }
}
