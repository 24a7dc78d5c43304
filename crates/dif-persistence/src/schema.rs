// Esquema Diesel de la caché SQLite.
use diesel::allow_tables_to_appear_in_same_query;
diesel::table! {
    general (id) {
        id -> Integer,
        query_key -> Text,
        symbol -> Text,
        position -> BigInt,
        target_species -> Nullable<BigInt>,
        pmid -> Nullable<BigInt>,
        pmc -> Nullable<Text>,
        interactor_type -> Nullable<Text>,
        interactor_name -> Nullable<Text>,
        interactor_bel -> Nullable<Text>,
        relation_type -> Nullable<Text>,
        target_bel -> Nullable<Text>,
        target_type -> Nullable<Text>,
        target_symbol -> Nullable<Text>,
        pmod_type -> Nullable<Text>,
    }
}
diesel::table! {
    druggable (id) {
        id -> Integer,
        query_key -> Text,
        symbol -> Text,
        position -> BigInt,
        drug -> Nullable<Text>,
        capsule_interactor_type -> Nullable<Text>,
        capsule_interactor_bel -> Nullable<Text>,
        interactor_bel -> Nullable<Text>,
        interactor_type -> Nullable<Text>,
        interactor_name -> Nullable<Text>,
        relation_type -> Nullable<Text>,
        target_bel -> Nullable<Text>,
        target_symbol -> Nullable<Text>,
        target_type -> Nullable<Text>,
        pmid -> Nullable<BigInt>,
        pmc -> Nullable<Text>,
        rel_pub_year -> Nullable<BigInt>,
        rel_rid -> Nullable<Text>,
        drug_rel_rid -> Nullable<Text>,
        drug_rel_actions -> Text,
        drugbank_id -> Nullable<Text>,
        chembl_id -> Nullable<Text>,
        pubchem_id -> Nullable<Text>,
        pmod_type -> Nullable<Text>,
    }
}
diesel::table! {
    bioassays (symbol) {
        symbol -> Text,
        uniprot_accession -> Nullable<Text>,
        assay_count -> Nullable<BigInt>,
    }
}
diesel::table! {
    edges (symbol) {
        symbol -> Text,
        in_count -> BigInt,
        out_count -> BigInt,
        both_count -> BigInt,
    }
}
diesel::table! {
    patents (drug_name) {
        drug_name -> Text,
        has_patent -> Bool,
        expired -> Bool,
        patent_numbers -> Text,
    }
}
diesel::table! {
    products (drug_name) {
        drug_name -> Text,
        has_generic -> Bool,
        has_approved_generic -> Bool,
        generic_products -> Text,
    }
}
diesel::table! {
    trials (id) {
        id -> Integer,
        drugbank_id -> Text,
        drug_name -> Text,
        trial_id -> Nullable<Text>,
        status -> Nullable<Text>,
        conditions -> Text,
        drugs_in_trial -> Text,
    }
}
allow_tables_to_appear_in_same_query!(general, druggable, bioassays, edges, patents, products, trials);
