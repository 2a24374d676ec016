//! Animal host recognition.

/// Known animal-host vocabulary, uppercase, exact-match membership.
pub const HOST_VOCABULARY: [&str; 24] = [
    "TURKEY",
    "DUCK",
    "MALLARD",
    "CHICKEN",
    "GOOSE",
    "PEACOCK",
    "CAT",
    "DOMESTIC",
    "EQUINE",
    "SWINE",
    "UNKNOWN",
    "SWAN",
    "TIGER",
    "WILLET",
    "QUAIL",
    "PELICAN",
    "EGRET",
    "PARTRIDGE",
    "CURLEW",
    "PIGEON",
    "CANINE",
    "TEAL",
    "GULL",
    "AVES",
];

/// Misspellings seen in submissions, mapped to vocabulary entries.
const HOST_CORRECTIONS: [(&str, &str); 9] = [
    ("TURKY", "TURKEY"),
    ("TUKEY", "TURKEY"),
    ("CHIKEN", "CHICKEN"),
    ("CHICKEM", "CHICKEN"),
    ("MALLERD", "MALLARD"),
    ("PECOCK", "PEACOCK"),
    ("PIDGEON", "PIGEON"),
    ("EQUIN", "EQUINE"),
    ("SWIN", "SWINE"),
];

/// Exact membership test against the host vocabulary, after uppercasing.
pub fn is_known_host(token: &str) -> bool {
    let upper = token.trim().to_uppercase();
    HOST_VOCABULARY.contains(&upper.as_str())
}

/// Correct a known misspelling to its vocabulary entry. Unmapped input
/// passes through unchanged (uppercased).
pub fn correct_host_spelling(token: &str) -> String {
    let upper = token.trim().to_uppercase();
    for (wrong, right) in HOST_CORRECTIONS {
        if upper == wrong {
            return right.to_string();
        }
    }
    upper
}

/// Test-submission hosts are accepted but flagged by the caller.
pub fn is_test_host(token: &str) -> bool {
    token.trim().to_uppercase().starts_with("TEST")
}
