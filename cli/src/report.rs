//! Plain-text tables for the terminal.

use nftree_core::{address_key, AttestStatus, HomeData, ProjectIndex};

/// Home page rows: edition, token, vault, attestation label.
pub fn collections_table(data: &HomeData, attested: &[String]) -> String {
    let attested: Vec<String> = attested.iter().map(|a| address_key(a)).collect();

    let mut out = format!(
        "{:<44} {:>10} {:<44} {}\n",
        "COLLECTION", "TOKEN", "VAULT", "STATUS"
    );
    for collection in &data.collections {
        let status = AttestStatus::initial(attested.contains(&collection.key()));
        out.push_str(&format!(
            "{:<44} {:>10} {:<44} {}\n",
            collection.edition_address,
            collection.token_id,
            data.vault_for(collection).unwrap_or("-"),
            status.label()
        ));
    }
    out
}

/// Every indexed project with its vault and artwork.
pub fn projects_table(index: &ProjectIndex) -> String {
    let mut out = format!("{:<44} {:<44} {}\n", "PROJECT", "VAULT", "IMAGE");
    for project in index.projects() {
        out.push_str(&format!(
            "{:<44} {:<44} {}\n",
            project.id,
            project.vault.as_ref().map(|v| v.id.as_str()).unwrap_or("-"),
            project.image_uri.as_deref().unwrap_or("-")
        ));
    }
    out
}
