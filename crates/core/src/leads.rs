//! Existing-influencer lead triage vocabulary and spreadsheet row mapping.

use std::collections::HashMap;

pub const LEAD_PENDING: &str = "pending";
pub const LEAD_ASSIGNED: &str = "assigned";
pub const LEAD_COMPLETED: &str = "completed";

/// All valid lead status values.
pub const VALID_LEAD_STATUSES: &[&str] = &[LEAD_PENDING, LEAD_ASSIGNED, LEAD_COMPLETED];

/// Validate that a lead status is one of the accepted values.
pub fn validate_lead_status(status: &str) -> Result<(), String> {
    if VALID_LEAD_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_LEAD_STATUSES.join(", ")
        ))
    }
}

/// One lead parsed from a spreadsheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadRow {
    pub username: String,
    pub profile_link: Option<String>,
    pub platform: Option<String>,
    pub followers: Option<i64>,
    pub category: Option<String>,
}

/// Column a header cell maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LeadColumn {
    Username,
    ProfileLink,
    Platform,
    Followers,
    Category,
}

/// Normalise a header cell: lowercase, drop spaces, underscores and dashes.
fn normalise_header(cell: &str) -> String {
    cell.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn column_for(header: &str) -> Option<LeadColumn> {
    match normalise_header(header).as_str() {
        "username" | "name" | "handle" => Some(LeadColumn::Username),
        "profilelink" | "link" | "profileurl" | "url" => Some(LeadColumn::ProfileLink),
        "platform" => Some(LeadColumn::Platform),
        "followers" | "followercount" => Some(LeadColumn::Followers),
        "category" | "niche" => Some(LeadColumn::Category),
        _ => None,
    }
}

/// Map a sheet (header row first, then data rows) to leads.
///
/// Rows without a username are skipped. Fails when the header row has no
/// username column, since no row could then produce a lead.
pub fn rows_to_leads(rows: &[Vec<String>]) -> Result<Vec<LeadRow>, String> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let columns: HashMap<LeadColumn, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| column_for(cell).map(|col| (col, idx)))
        .collect();

    let username_idx = *columns
        .get(&LeadColumn::Username)
        .ok_or_else(|| "Spreadsheet header must contain a 'username' column".to_string())?;

    let cell = |row: &Vec<String>, col: LeadColumn| -> Option<String> {
        columns
            .get(&col)
            .and_then(|idx| row.get(*idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let leads = data
        .iter()
        .filter_map(|row| {
            let username = row.get(username_idx)?.trim();
            if username.is_empty() {
                return None;
            }
            Some(LeadRow {
                username: username.to_string(),
                profile_link: cell(row, LeadColumn::ProfileLink),
                platform: cell(row, LeadColumn::Platform),
                followers: cell(row, LeadColumn::Followers)
                    .and_then(|f| f.replace(',', "").parse::<f64>().ok())
                    .map(|f| f as i64),
                category: cell(row, LeadColumn::Category),
            })
        })
        .collect();

    Ok(leads)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn lead_status_vocabulary() {
        assert!(validate_lead_status("assigned").is_ok());
        assert!(validate_lead_status("approved").is_err());
    }

    #[test]
    fn headers_are_matched_loosely() {
        let rows = vec![
            row(&["User Name", "Profile Link", "FOLLOWERS"]),
            row(&["@alpha", "https://instagram.com/alpha", "12,000"]),
        ];
        let leads = rows_to_leads(&rows).unwrap();
        assert_eq!(
            leads,
            vec![LeadRow {
                username: "@alpha".into(),
                profile_link: Some("https://instagram.com/alpha".into()),
                followers: Some(12_000),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn rows_without_username_are_skipped() {
        let rows = vec![
            row(&["username", "category"]),
            row(&["", "Food"]),
            row(&["beta", ""]),
            row(&[]),
        ];
        let leads = rows_to_leads(&rows).unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].username, "beta");
        assert_eq!(leads[0].category, None);
    }

    #[test]
    fn missing_username_column_is_an_error() {
        let rows = vec![row(&["link"]), row(&["https://x"])];
        assert!(rows_to_leads(&rows).is_err());
    }

    #[test]
    fn empty_sheet_yields_no_leads() {
        assert!(rows_to_leads(&[]).unwrap().is_empty());
    }
}
