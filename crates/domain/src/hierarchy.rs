use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use stratum_core::UserId;

/// One `managerId` edge of the organizational hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportingLine {
    /// The reporting user.
    pub user_id: UserId,
    /// The user's direct manager, `None` at the top of the hierarchy.
    pub manager_id: Option<UserId>,
}

/// Result of walking the hierarchy below one manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubordinateTraversal {
    /// Every user transitively reporting to the root, excluding the root.
    pub subordinates: BTreeSet<UserId>,
    /// Users reached a second time, which only happens when the edges form a cycle.
    pub revisited: BTreeSet<UserId>,
}

impl SubordinateTraversal {
    /// Returns whether the walk ran into a cycle.
    #[must_use]
    pub fn cycle_detected(&self) -> bool {
        !self.revisited.is_empty()
    }
}

/// Collects the transitive closure of reversed `managerId` edges below `root`.
///
/// Breadth-first with a visited set: no id is enqueued twice, so the walk
/// terminates on cyclic data and does at most one step per reporting line.
#[must_use]
pub fn collect_subordinates(root: UserId, lines: &[ReportingLine]) -> SubordinateTraversal {
    let mut reports_by_manager: HashMap<UserId, Vec<UserId>> = HashMap::new();
    for line in lines {
        if let Some(manager_id) = line.manager_id {
            reports_by_manager
                .entry(manager_id)
                .or_default()
                .push(line.user_id);
        }
    }

    let mut traversal = SubordinateTraversal::default();
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(manager_id) = queue.pop_front() {
        let Some(reports) = reports_by_manager.get(&manager_id) else {
            continue;
        };

        for report in reports {
            if !visited.insert(*report) {
                traversal.revisited.insert(*report);
                continue;
            }

            traversal.subordinates.insert(*report);
            queue.push_back(*report);
        }
    }

    traversal
}
