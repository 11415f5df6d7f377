//! Status digest for transport-level reporting commands.

use crate::types::posting::JobPosting;

/// How many of the most recent postings the digest shows.
const DIGEST_TAIL: usize = 5;

/// Render a status digest: total count plus the most recent postings.
///
/// `jobs` is expected in creation order, as returned by
/// [`crate::traits::store::JobStore::list_active`].
pub fn format_digest(jobs: &[JobPosting]) -> String {
    if jobs.is_empty() {
        return "No job postings collected yet.".to_string();
    }

    let mut digest = format!("📊 Job postings collected: {}\n\n", jobs.len());
    digest.push_str("🔍 Latest postings:\n\n");

    for job in &jobs[jobs.len().saturating_sub(DIGEST_TAIL)..] {
        digest.push_str(&format!("📌 {}\n", job.title));
        if let Some(company) = &job.company {
            digest.push_str(&format!("🏢 Company: {company}\n"));
        }
        if let Some(salary) = &job.salary {
            digest.push_str(&format!("💰 Salary: {salary}\n"));
        }
        if let Some(location) = &job.location {
            digest.push_str(&format!("📍 Location: {location}\n"));
        }
        if let Some(link) = &job.source_link {
            digest.push_str(&format!("🔗 Link: {link}\n"));
        }
        digest.push('\n');
    }

    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::posting::SourceIdentity;

    fn posting(message_id: i64, title: &str) -> JobPosting {
        JobPosting::new(title, SourceIdentity::channel(1, message_id))
    }

    #[test]
    fn test_empty_digest() {
        assert_eq!(format_digest(&[]), "No job postings collected yet.");
    }

    #[test]
    fn test_digest_shows_optional_fields() {
        let jobs = vec![posting(1, "Engineer")
            .with_company("Acme Corp")
            .with_salary("4000")
            .with_location("Remote")
            .with_source_link("https://t.me/acme/1")];

        let digest = format_digest(&jobs);

        assert!(digest.contains("📊 Job postings collected: 1"));
        assert!(digest.contains("📌 Engineer"));
        assert!(digest.contains("🏢 Company: Acme Corp"));
        assert!(digest.contains("💰 Salary: 4000"));
        assert!(digest.contains("📍 Location: Remote"));
        assert!(digest.contains("🔗 Link: https://t.me/acme/1"));
    }

    #[test]
    fn test_digest_omits_absent_fields() {
        let digest = format_digest(&[posting(1, "Engineer")]);

        assert!(!digest.contains("Company:"));
        assert!(!digest.contains("Salary:"));
        assert!(!digest.contains("Link:"));
    }

    #[test]
    fn test_digest_shows_last_five_in_order() {
        let jobs: Vec<_> = (1..=7)
            .map(|n| posting(n, &format!("Job {n}")))
            .collect();

        let digest = format_digest(&jobs);

        assert!(digest.contains("📊 Job postings collected: 7"));
        assert!(!digest.contains("Job 1\n"));
        assert!(!digest.contains("Job 2\n"));
        for n in 3..=7 {
            assert!(digest.contains(&format!("📌 Job {n}\n")));
        }
        // Oldest of the shown postings comes first
        let pos_3 = digest.find("Job 3").unwrap();
        let pos_7 = digest.find("Job 7").unwrap();
        assert!(pos_3 < pos_7);
    }
}
