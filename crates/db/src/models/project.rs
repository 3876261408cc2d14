//! Project entity model, DTOs and the join-row grouping used by reads.

use portfolio_core::error::CoreError;
use portfolio_core::project::ProjectDraft;
use portfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::technology::TechnologySummary;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for both create and update.
///
/// Update is a full replace, so the body has the same shape: an omitted or
/// `null` `technology_ids` means "no technologies", not "leave unchanged".
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technology_ids: Option<Vec<DbId>>,
}

impl ProjectInput {
    /// Validate and normalise into a [`ProjectDraft`].
    pub fn to_draft(&self) -> Result<ProjectDraft, CoreError> {
        ProjectDraft::new(
            &self.name,
            self.description.as_deref(),
            self.technology_ids.as_deref().unwrap_or_default(),
        )
    }
}

/// Response for a freshly created project: the row plus the linked ids.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedProject {
    #[serde(flatten)]
    pub project: Project,
    pub technology_ids: Vec<DbId>,
}

/// A project enriched with its linked technologies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithTechnologies {
    #[serde(flatten)]
    pub project: Project,
    pub technologies: Vec<TechnologySummary>,
}

/// One row of `projects LEFT JOIN project_technologies LEFT JOIN technologies`.
///
/// A project with no links yields a single row whose technology columns are
/// NULL.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectTechnologyRow {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub technology_id: Option<DbId>,
    pub technology_name: Option<String>,
}

/// Fold flat join rows into one entry per project.
///
/// Rows must be contiguous per project id (both read queries order by
/// `p.id`), so only the last group is compared. Within a project, repeated
/// technology pairs collapse to one entry and NULL technology columns
/// contribute nothing, so an unlinked project ends up with `[]`.
pub fn group_rows(rows: Vec<ProjectTechnologyRow>) -> Vec<ProjectWithTechnologies> {
    let mut grouped: Vec<ProjectWithTechnologies> = Vec::new();

    for row in rows {
        let technology = match (row.technology_id, row.technology_name) {
            (Some(id), Some(name)) => Some(TechnologySummary { id, name }),
            _ => None,
        };

        if grouped.last().map(|g| g.project.id) != Some(row.id) {
            grouped.push(ProjectWithTechnologies {
                project: Project {
                    id: row.id,
                    name: row.name,
                    description: row.description,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                technologies: Vec::new(),
            });
        }

        if let (Some(group), Some(technology)) = (grouped.last_mut(), technology) {
            if !group.technologies.iter().any(|t| t.id == technology.id) {
                group.technologies.push(technology);
            }
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: DbId, tech: Option<(DbId, &str)>) -> ProjectTechnologyRow {
        let now = chrono::Utc::now();
        ProjectTechnologyRow {
            id,
            name: format!("Project {id}"),
            description: String::new(),
            created_at: now,
            updated_at: now,
            technology_id: tech.map(|(tid, _)| tid),
            technology_name: tech.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn unlinked_project_has_empty_list() {
        let grouped = group_rows(vec![row(1, None)]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].technologies.is_empty());
    }

    #[test]
    fn rows_for_same_project_are_merged() {
        let grouped = group_rows(vec![
            row(1, Some((10, "Rust"))),
            row(1, Some((11, "PostgreSQL"))),
            row(2, None),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].project.id, 1);
        assert_eq!(
            grouped[0].technologies,
            vec![
                TechnologySummary { id: 10, name: "Rust".into() },
                TechnologySummary { id: 11, name: "PostgreSQL".into() },
            ]
        );
        assert_eq!(grouped[1].project.id, 2);
        assert!(grouped[1].technologies.is_empty());
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let grouped = group_rows(vec![row(3, Some((5, "Axum"))), row(3, Some((5, "Axum")))]);
        assert_eq!(grouped[0].technologies.len(), 1);
    }

    #[test]
    fn half_null_technology_is_ignored() {
        let mut r = row(4, Some((7, "Go")));
        r.technology_name = None;
        let grouped = group_rows(vec![r]);
        assert!(grouped[0].technologies.is_empty());
    }

    #[test]
    fn contiguous_groups_keep_query_order() {
        let grouped = group_rows(vec![
            row(1, Some((10, "Rust"))),
            row(1, Some((12, "Docker"))),
            row(2, Some((10, "Rust"))),
            row(3, None),
        ]);
        let ids: Vec<DbId> = grouped.iter().map(|g| g.project.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(grouped[0].technologies.len(), 2);
        assert_eq!(grouped[1].technologies.len(), 1);
        assert!(grouped[2].technologies.is_empty());
    }

    #[test]
    fn null_technology_ids_mean_no_links() {
        let input: ProjectInput =
            serde_json::from_value(serde_json::json!({"name": "X", "technology_ids": null}))
                .unwrap();
        assert!(input.to_draft().unwrap().technology_ids.is_empty());

        let input: ProjectInput = serde_json::from_value(serde_json::json!({"name": "X"})).unwrap();
        assert!(input.to_draft().unwrap().technology_ids.is_empty());
    }

    #[test]
    fn no_rows_no_projects() {
        assert!(group_rows(Vec::new()).is_empty());
    }

    #[test]
    fn serializes_empty_list_not_null_entry() {
        let grouped = group_rows(vec![row(1, None)]);
        let json = serde_json::to_value(&grouped[0]).unwrap();
        assert_eq!(json["technologies"], serde_json::json!([]));
        assert_eq!(json["id"], 1);
    }
}
