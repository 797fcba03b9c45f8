use crate::{Direction, Grid, GroupId};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// Push of one group, numbered as in the state before the push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub group: GroupId,
    pub dir: Direction,
}

/// States from the initial one to a solved one, and the moves between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub states: Vec<Grid>,
    pub moves: Vec<Move>,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// `None` if no solved state is reachable.
    pub solution: Option<Solution>,
    /// Number of distinct states visited.
    pub expanded: usize,
}

impl Grid {
    /// Distinct states reachable by pushing one group sideways.
    ///
    /// Sorted, so the order does not depend on which move produced a state.
    /// When several moves lead to the same state, the first one tried is kept.
    pub fn successors(&self) -> Vec<(Move, Grid)> {
        let mut result = Vec::new();
        for group in (1..=self.groups).map(GroupId) {
            for dir in Direction::HORIZONTAL {
                let mut next = self.clone();
                if next.push_group(group, dir).is_ok() {
                    result.push((Move { group, dir }, next));
                }
            }
        }
        result.sort_by(|(_, a), (_, b)| a.cmp(b));
        result.dedup_by(|(_, a), (_, b)| a == b);
        result
    }
}

/// Find a solution with the fewest moves by breadth-first search.
///
/// `on_step` is called once for each state expanded.
pub fn bfs(initial: Grid, mut on_step: impl FnMut()) -> SearchResult {
    if initial.is_solved() {
        return SearchResult {
            solution: Some(Solution {
                states: vec![initial],
                moves: Vec::new(),
            }),
            expanded: 0,
        };
    }

    // Visit order is the queue; values link to the parent and the move from it.
    let mut state_parent: IndexMap<Grid, Option<(usize, Move)>> = IndexMap::default();
    state_parent.insert(initial, None);

    let mut cursor = 0;
    let (final_state, final_move) = 'bfs: loop {
        #[cfg(feature = "coz")]
        coz::scope!("Expand");

        if cursor >= state_parent.len() {
            tracing::info!(expanded = state_parent.len(), "no solution found");
            return SearchResult {
                solution: None,
                expanded: state_parent.len(),
            };
        }
        if cursor % 10_000 == 0 && cursor != 0 {
            tracing::debug!(cursor, visited = state_parent.len(), "expanding");
        }
        on_step();

        let successors = state_parent
            .get_index(cursor)
            .expect("Cursor is in bound")
            .0
            .successors();
        for (mv, state) in successors {
            #[cfg(feature = "coz")]
            coz::progress!("Successor");

            if state.is_solved() {
                break 'bfs (state, mv);
            }
            state_parent.entry(state).or_insert(Some((cursor, mv)));
        }
        cursor += 1;
    };

    let mut states = vec![final_state];
    let mut moves = vec![final_move];
    let chain = std::iter::successors(Some(cursor), |&i| {
        state_parent[i].map(|(parent, _)| parent)
    });
    for i in chain {
        let (state, link) = state_parent.get_index(i).expect("Parent is visited");
        states.push(state.clone());
        moves.extend(link.map(|(_, mv)| mv));
    }
    states.reverse();
    moves.reverse();

    tracing::info!(
        expanded = state_parent.len(),
        moves = moves.len(),
        "solution found"
    );
    SearchResult {
        solution: Some(Solution { states, moves }),
        expanded: state_parent.len(),
    }
}
