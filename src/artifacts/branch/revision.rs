use crate::areas::repository::Repository;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{MIN_PREFIX_LENGTH, OBJECT_ID_LENGTH};
use crate::errors::RepositoryError;
use anyhow::Context;

/// A commit expression.
///
/// Supported forms:
/// - `HEAD` (alias `@`): head of the current branch
/// - full or abbreviated (at least 4 hex characters) commit ids
/// - `<revision>^`: first parent
/// - `<revision>~<n>`: n-th first-parent ancestor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Head,
    /// Full id or id prefix, lowercase
    Oid(String),
    Parent(Box<Revision>),
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .map_err(|_| RepositoryError::InvalidRevision(revision.to_string()))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);

            if resolved_name == "HEAD" {
                Ok(Revision::Head)
            } else if Self::looks_like_oid(resolved_name) {
                Ok(Revision::Oid(resolved_name.to_ascii_lowercase()))
            } else {
                Err(RepositoryError::InvalidRevision(revision.to_string()).into())
            }
        }
    }

    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Head => repository.head_oid(),
            Revision::Oid(prefix) => Self::resolve_oid(prefix, repository),
            Revision::Parent(base_revision) => {
                let oid = base_revision.resolve(repository)?;
                self.resolve_commit_parent(&oid, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = self.resolve_commit_parent(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(
        &self,
        oid: &ObjectId,
        repository: &Repository,
    ) -> anyhow::Result<ObjectId> {
        let commit = repository.database().parse_object_as_commit(oid)?;

        commit
            .parent()
            .cloned()
            .ok_or_else(|| RepositoryError::CommitNotFound(self.to_string()).into())
    }

    fn resolve_oid(prefix: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        let database = repository.database();

        let is_commit = |oid: &ObjectId| {
            database
                .get_object_type(oid)
                .map(|object_type| object_type == ObjectType::Commit)
                .unwrap_or(false)
        };

        if prefix.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(prefix.to_string())?;
            return if is_commit(&oid) {
                Ok(oid)
            } else {
                Err(RepositoryError::CommitNotFound(prefix.to_string()).into())
            };
        }

        // blobs may share the prefix; only commits are candidates
        let mut matches = database
            .find_objects_by_prefix(prefix)?
            .into_iter()
            .filter(|oid| is_commit(oid))
            .collect::<Vec<_>>();

        match matches.len() {
            0 => Err(RepositoryError::CommitNotFound(prefix.to_string()).into()),
            1 => Ok(matches.remove(0)),
            _ => Err(RepositoryError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                candidates: matches.iter().map(ObjectId::to_short_oid).collect(),
            }
            .into()),
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        s.len() >= MIN_PREFIX_LENGTH
            && s.len() <= OBJECT_ID_LENGTH
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Head => write!(f, "HEAD"),
            Revision::Oid(prefix) => write!(f, "{prefix}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
