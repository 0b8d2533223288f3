//! Bundled lookup tables: states, FIPS prefixes, regional multipliers and the
//! fallback occupation list. Built once and shared read-only.

use crate::wages::{LevelThresholds, OccupationRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Synthetic level 1–3 thresholds before regional adjustment.
pub const BASE_THRESHOLDS: LevelThresholds = LevelThresholds {
    level1: 60_000,
    level2: 85_000,
    level3: 110_000,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsState {
    pub code: &'static str,
    pub name: &'static str,
    pub fips: &'static str,
}

const STATES: &[UsState] = &[
    UsState { code: "AL", name: "Alabama", fips: "01" },
    UsState { code: "AK", name: "Alaska", fips: "02" },
    UsState { code: "AZ", name: "Arizona", fips: "04" },
    UsState { code: "AR", name: "Arkansas", fips: "05" },
    UsState { code: "CA", name: "California", fips: "06" },
    UsState { code: "CO", name: "Colorado", fips: "08" },
    UsState { code: "CT", name: "Connecticut", fips: "09" },
    UsState { code: "DE", name: "Delaware", fips: "10" },
    UsState { code: "FL", name: "Florida", fips: "12" },
    UsState { code: "GA", name: "Georgia", fips: "13" },
    UsState { code: "HI", name: "Hawaii", fips: "15" },
    UsState { code: "ID", name: "Idaho", fips: "16" },
    UsState { code: "IL", name: "Illinois", fips: "17" },
    UsState { code: "IN", name: "Indiana", fips: "18" },
    UsState { code: "IA", name: "Iowa", fips: "19" },
    UsState { code: "KS", name: "Kansas", fips: "20" },
    UsState { code: "KY", name: "Kentucky", fips: "21" },
    UsState { code: "LA", name: "Louisiana", fips: "22" },
    UsState { code: "ME", name: "Maine", fips: "23" },
    UsState { code: "MD", name: "Maryland", fips: "24" },
    UsState { code: "MA", name: "Massachusetts", fips: "25" },
    UsState { code: "MI", name: "Michigan", fips: "26" },
    UsState { code: "MN", name: "Minnesota", fips: "27" },
    UsState { code: "MS", name: "Mississippi", fips: "28" },
    UsState { code: "MO", name: "Missouri", fips: "29" },
    UsState { code: "MT", name: "Montana", fips: "30" },
    UsState { code: "NE", name: "Nebraska", fips: "31" },
    UsState { code: "NV", name: "Nevada", fips: "32" },
    UsState { code: "NH", name: "New Hampshire", fips: "33" },
    UsState { code: "NJ", name: "New Jersey", fips: "34" },
    UsState { code: "NM", name: "New Mexico", fips: "35" },
    UsState { code: "NY", name: "New York", fips: "36" },
    UsState { code: "NC", name: "North Carolina", fips: "37" },
    UsState { code: "ND", name: "North Dakota", fips: "38" },
    UsState { code: "OH", name: "Ohio", fips: "39" },
    UsState { code: "OK", name: "Oklahoma", fips: "40" },
    UsState { code: "OR", name: "Oregon", fips: "41" },
    UsState { code: "PA", name: "Pennsylvania", fips: "42" },
    UsState { code: "RI", name: "Rhode Island", fips: "44" },
    UsState { code: "SC", name: "South Carolina", fips: "45" },
    UsState { code: "SD", name: "South Dakota", fips: "46" },
    UsState { code: "TN", name: "Tennessee", fips: "47" },
    UsState { code: "TX", name: "Texas", fips: "48" },
    UsState { code: "UT", name: "Utah", fips: "49" },
    UsState { code: "VT", name: "Vermont", fips: "50" },
    UsState { code: "VA", name: "Virginia", fips: "51" },
    UsState { code: "WA", name: "Washington", fips: "53" },
    UsState { code: "WV", name: "West Virginia", fips: "54" },
    UsState { code: "WI", name: "Wisconsin", fips: "55" },
    UsState { code: "WY", name: "Wyoming", fips: "56" },
    UsState { code: "DC", name: "District of Columbia", fips: "11" },
];

pub fn states() -> &'static [UsState] {
    STATES
}

pub fn state(code: &str) -> Option<&'static UsState> {
    STATES
        .iter()
        .find(|state| state.code.eq_ignore_ascii_case(code.trim()))
}

pub fn state_for_fips(state_fips: &str) -> Option<&'static UsState> {
    static BY_FIPS: OnceLock<HashMap<&'static str, &'static UsState>> = OnceLock::new();
    BY_FIPS
        .get_or_init(|| STATES.iter().map(|state| (state.fips, state)).collect())
        .get(state_fips)
        .copied()
}

/// Cost-of-living scalars applied to the synthetic thresholds.
pub fn regional_multipliers() -> &'static HashMap<String, f64> {
    static MULTIPLIERS: OnceLock<HashMap<String, f64>> = OnceLock::new();
    MULTIPLIERS.get_or_init(|| {
        const BY_STATE: &[(&str, f64)] = &[
            // High cost
            ("CA", 1.35), ("NY", 1.30), ("MA", 1.25), ("WA", 1.25), ("NJ", 1.20),
            ("CT", 1.18), ("MD", 1.15), ("DC", 1.35), ("CO", 1.12), ("VA", 1.10),
            // Medium cost
            ("IL", 1.05), ("PA", 1.02), ("FL", 1.00), ("TX", 0.98), ("AZ", 0.95),
            ("OR", 1.08), ("MN", 1.00), ("GA", 0.95), ("NC", 0.93), ("MI", 0.92),
            // Lower cost
            ("OH", 0.88), ("IN", 0.85), ("WI", 0.88), ("MO", 0.85), ("TN", 0.85),
            ("AL", 0.82), ("KY", 0.82), ("SC", 0.85), ("LA", 0.85), ("OK", 0.80),
            ("AR", 0.78), ("MS", 0.75), ("WV", 0.78), ("KS", 0.82), ("NE", 0.82),
            ("IA", 0.83), ("ND", 0.85), ("SD", 0.82), ("MT", 0.88), ("WY", 0.85),
            ("ID", 0.88), ("UT", 0.92), ("NV", 0.98), ("NM", 0.85), ("AK", 1.15),
            ("HI", 1.30), ("ME", 0.95), ("VT", 0.98), ("NH", 1.05), ("RI", 1.05),
            ("DE", 1.02),
        ];
        BY_STATE
            .iter()
            .map(|(code, multiplier)| (code.to_string(), *multiplier))
            .collect()
    })
}

/// Occupations commonly filed for, served when no generated catalog exists.
pub fn sample_occupations() -> Vec<OccupationRecord> {
    const SAMPLE: &[(&str, &str)] = &[
        ("11-3021", "Computer and Information Systems Managers"),
        ("11-9041", "Architectural and Engineering Managers"),
        ("13-1111", "Management Analysts"),
        ("13-1161", "Market Research Analysts and Marketing Specialists"),
        ("13-2011", "Accountants and Auditors"),
        ("13-2041", "Credit Analysts"),
        ("13-2051", "Financial Analysts"),
        ("15-1211", "Computer Systems Analysts"),
        ("15-1212", "Information Security Analysts"),
        ("15-1221", "Computer and Information Research Scientists"),
        ("15-1231", "Computer Network Support Specialists"),
        ("15-1232", "Computer User Support Specialists"),
        ("15-1243", "Database Architects"),
        ("15-1244", "Network and Computer Systems Administrators"),
        ("15-1245", "Database Administrators"),
        ("15-1252", "Software Developers"),
        ("15-1254", "Web Developers"),
        ("15-1256", "Software Developers and Software Quality Assurance Analysts and Testers"),
        ("15-1257", "Web Developers and Digital Interface Designers"),
        ("15-1299", "Computer Occupations, All Other"),
        ("15-2031", "Operations Research Analysts"),
        ("15-2041", "Statisticians"),
        ("15-2051", "Data Scientists"),
        ("17-2071", "Electrical Engineers"),
        ("17-2112", "Industrial Engineers"),
        ("17-2141", "Mechanical Engineers"),
        ("19-1042", "Medical Scientists, Except Epidemiologists"),
        ("19-2031", "Chemists"),
        ("25-1011", "Business Teachers, Postsecondary"),
        ("29-1141", "Registered Nurses"),
    ];

    SAMPLE
        .iter()
        .map(|(code, title)| OccupationRecord::new(*code, *title))
        .collect()
}
