//! Human-readable rendering of Healthz responses.

use crate::schema::{ComponentStatus, ListResponse};

/// Render a component status as returned by a Get call.
///
/// The path is shown by element names only; predicates are not re-rendered.
pub fn render_component_status(cs: &ComponentStatus) -> String {
    let path = match &cs.path {
        Some(path) => path.to_name_string(),
        None => "<nil>".to_string(),
    };

    let mut lines = vec![
        format!("Healthz Status for: {}", path),
        format!("Status: {}", cs.status),
        format!("Acknowledged: {}", cs.acknowledged),
        format!("ID: {}", cs.id),
        "Artifacts:".to_string(),
    ];

    for artifact in &cs.artifacts {
        lines.push(format!("  - Artifact ID: {}", artifact.id));
    }

    if let Some(created) = &cs.created {
        lines.push(format!("Created: {}", created));
    }
    if let Some(expires) = &cs.expires {
        lines.push(format!("Expires: {}", expires));
    }

    finish(lines)
}

/// Render the raw structure of a List response.
pub fn render_list(resp: &ListResponse) -> String {
    format!("List response: {:#?}\n", resp)
}

/// Render the raw structure of the status returned by a Check call.
pub fn render_check(status: &ComponentStatus) -> String {
    format!("Check response: {:#?}\n", status)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;
    use crate::schema::{ArtifactHeader, Status};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_minimal() {
        let path = parse_path("/component[name=fan1]/status");
        let cs = ComponentStatus::new(path, Status::Healthy, "evt-1");
        assert_eq!(
            render_component_status(&cs),
            "Healthz Status for: /component/status\n\
             Status: STATUS_HEALTHY\n\
             Acknowledged: false\n\
             ID: evt-1\n\
             Artifacts:\n"
        );
    }

    #[test]
    fn test_render_full() {
        let path = parse_path("/components/component[name=psu1]");
        let mut cs = ComponentStatus::new(path, Status::Unhealthy, "evt-7");
        cs.acknowledged = true;
        cs.artifacts = vec![
            ArtifactHeader {
                id: "core".to_string(),
                kind: Some("file".to_string()),
            },
            ArtifactHeader {
                id: "trace".to_string(),
                kind: None,
            },
        ];
        cs.created = Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        cs.expires = Some(Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap());

        let out = render_component_status(&cs);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Healthz Status for: /components/component");
        assert_eq!(lines[1], "Status: STATUS_UNHEALTHY");
        assert_eq!(lines[2], "Acknowledged: true");
        assert_eq!(lines[5], "  - Artifact ID: core");
        assert_eq!(lines[6], "  - Artifact ID: trace");
        assert_eq!(lines[7], "Created: 2024-05-01 12:00:00 UTC");
        assert_eq!(lines[8], "Expires: 2024-05-08 12:00:00 UTC");
    }

    #[test]
    fn test_render_missing_path() {
        let cs = ComponentStatus::default();
        assert!(render_component_status(&cs).starts_with("Healthz Status for: <nil>\n"));
    }

    #[test]
    fn test_render_list() {
        let resp = ListResponse {
            statuses: vec![ComponentStatus::new(parse_path("/a"), Status::Healthy, "e1")],
        };
        let out = render_list(&resp);
        assert!(out.starts_with("List response: ListResponse {"));
        assert!(out.contains("\"e1\""));
    }

    #[test]
    fn test_render_check() {
        let cs = ComponentStatus::new(parse_path("/a"), Status::Unhealthy, "e2");
        let out = render_check(&cs);
        assert!(out.starts_with("Check response: ComponentStatus {"));
        assert!(out.contains("Unhealthy"));
    }
}
