//! The static event taxonomy and its expansion.
//!
//! `TAXONOMY` maps each resource category to its action names. The
//! table is configuration data: changing the generated method surface
//! means changing the table, nothing else.

use std::collections::HashMap;

/// Category → actions. Order is the order methods are listed in.
pub const TAXONOMY: &[(&str, &[&str])] = &[
    (
        "user",
        &[
            "login",
            "logout",
            "signup",
            "passwordCreate",
            "passwordEdit",
            "emailEdit",
            "usernameEdit",
            "delete",
        ],
    ),
    ("apiKey", &["create", "edit", "delete"]),
    ("publicKey", &["create", "delete"]),
    (
        "application",
        &[
            "create",
            "open",
            "osDownload",
            "osConfigDownload",
            "publicUrlEnable",
            "publicUrlDisable",
            "restart",
            "supportAccessEnable",
            "supportAccessDisable",
            "purge",
            "reboot",
            "shutdown",
            "applicationTypeChange",
            "delete",
            "pinToRelease",
        ],
    ),
    ("applicationTag", &["set", "create", "edit", "delete"]),
    ("applicationMembers", &["create", "edit", "delete"]),
    ("configVariable", &["create", "edit", "delete"]),
    ("environmentVariable", &["create", "edit", "delete"]),
    ("serviceVariable", &["create", "edit", "delete"]),
    (
        "device",
        &[
            "open",
            "rename",
            "terminalOpen",
            "terminalClose",
            "publicUrlEnable",
            "publicUrlDisable",
            "lockOverrideEnable",
            "lockOverrideDisable",
            "restart",
            "move",
            "hostOsUpdate",
            "hostOsUpdateHide",
            "hostOsUpdateFailed",
            "hostOsUpdateSucceeded",
            "localModeEnable",
            "localModeDisable",
            "supportAccessEnable",
            "supportAccessDisable",
            "purge",
            "reboot",
            "shutdown",
            "delete",
            "deactivate",
            "pinToRelease",
            "diagnosticsDownload",
            "diagnosticsOpen",
            "diagnosticsRun",
            "healthChecksOpen",
            "healthChecksRun",
            "supervisorStateOpen",
        ],
    ),
    (
        "release",
        &[
            "addReleaseOpen",
            "instructionsCopy",
            "installLinkClick",
            "gettingStartedClick",
            "deployFromUrl",
        ],
    ),
    ("deviceConfigVariable", &["create", "edit", "delete"]),
    ("deviceEnvironmentVariable", &["create", "edit", "delete"]),
    ("deviceServiceVariable", &["create", "edit", "delete"]),
    ("deviceTag", &["set", "create", "edit", "delete"]),
    ("releaseTag", &["set", "create", "edit", "delete"]),
    (
        "billing",
        &["paymentInfoUpdate", "planChange", "invoiceDownload"],
    ),
    ("onboarding", &["stepClick", "whatNextItemClick"]),
    (
        "gettingStartedGuide",
        &["modalShow", "modalHide", "modalSkip", "modalGuideOpen"],
    ),
    ("page", &["visit"]),
    ("navigation", &["click"]),
    ("members", &["create", "edit", "delete", "invite"]),
    ("deployToBalena", &["cancel"]),
    ("invite", &["addInviteOpen", "create", "delete", "accept"]),
];

/// The title-cased display name for a (category, action) pair, e.g.
/// `applicationMembers` + `create` → "Application Members Create".
pub fn display_name(category: &str, action: &str) -> String {
    title_case(&format!("{category} {action}"))
}

/// Expand the table into display names keyed by (category, action).
/// Pure: the result depends on the table alone.
pub(crate) fn expand() -> HashMap<(String, String), String> {
    let mut names = HashMap::new();
    for (category, actions) in TAXONOMY {
        for action in *actions {
            names.insert(
                (category.to_string(), action.to_string()),
                display_name(category, action),
            );
        }
    }
    names
}

/// Split on whitespace and camelCase boundaries, then capitalize the
/// first letter of every word.
fn title_case(input: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for chunk in input.split_whitespace() {
        let mut word = String::new();
        for ch in chunk.chars() {
            if ch.is_uppercase() && !word.is_empty() {
                words.push(word);
                word = String::new();
            }
            word.push(ch);
        }
        if !word.is_empty() {
            words.push(word);
        }
    }

    let mut out = String::with_capacity(input.len() + words.len());
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_splits_camel_case() {
        assert_eq!(title_case("device restart"), "Device Restart");
        assert_eq!(title_case("device diagnosticsRun"), "Device Diagnostics Run");
        assert_eq!(
            title_case("applicationMembers create"),
            "Application Members Create"
        );
        assert_eq!(
            title_case("deployToBalena cancel"),
            "Deploy To Balena Cancel"
        );
        assert_eq!(
            title_case("device hostOsUpdateSucceeded"),
            "Device Host Os Update Succeeded"
        );
    }

    #[test]
    fn expansion_covers_every_pair() {
        let names = expand();
        let total: usize = TAXONOMY.iter().map(|(_, actions)| actions.len()).sum();
        assert_eq!(names.len(), total);
        assert_eq!(
            names.get(&("page".to_string(), "visit".to_string())).unwrap(),
            "Page Visit"
        );
    }

    #[test]
    fn expansion_is_reproducible() {
        assert_eq!(expand(), expand());
    }
}
