//! Typed form of the host's command surface.
//!
//! Each [`Command`] corresponds to one script command the host exposes; the
//! host parses its own syntax into a `Command`, runs it through
//! [`Pathfeeder::execute`] and writes the [`Reply`] back into its variables
//! and switches. Only [`Reply::is_success`] decides whether the other outputs
//! may be trusted.

use pathfeeder_core::Point;

use crate::cost::CostSpec;
use crate::error::Result;
use crate::service::{Host, Mover, Pathfeeder};
use crate::store::PathId;

/// One host command.
///
/// Cost writes that the tables refuse (non-positive values, ids outside the
/// accepted range) are silent no-ops and still reply [`Reply::Done`]; the
/// typed setters on [`Pathfeeder`] report them as `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FindPath { mover: Mover, dest: Point },
    PathLength { path: PathId },
    /// `index` comes straight from the host and may be negative.
    PathVertex { path: PathId, index: i32 },
    ClearPath { path: PathId },
    ClearPaths,
    SetTerrainCost { terrain: i32, cost: CostSpec },
    ResetTerrainCost { terrain: i32 },
    ClearTerrainCosts,
    GetTerrainCost { terrain: i32 },
    SetTransitionCost { from: i32, to: i32, cost: CostSpec },
    ResetTransitionCost { from: i32, to: i32 },
    ClearTransitionCosts,
    GetTransitionCost { from: i32, to: i32 },
    SaveCosts,
    LoadCosts(Vec<u8>),
}

/// Outputs of a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The command has no outputs.
    Done,
    Path(Option<PathId>),
    Length(Option<usize>),
    Vertex(Option<Point>),
    Cost(i32),
    Saved(Vec<u8>),
}

impl Reply {
    /// The success flag handed back to the host.
    pub fn is_success(&self) -> bool {
        match self {
            Self::Path(id) => id.is_some(),
            Self::Length(len) => len.is_some(),
            Self::Vertex(v) => v.is_some(),
            Self::Done | Self::Cost(_) | Self::Saved(_) => true,
        }
    }
}

impl Pathfeeder {
    /// Run one command against `host`.
    pub fn execute<H: Host>(&mut self, host: &H, command: Command) -> Result<Reply> {
        let reply = match command {
            Command::FindPath { mover, dest } => Reply::Path(self.find_path(host, mover, dest)?),
            Command::PathLength { path } => Reply::Length(self.path_len(path)),
            Command::PathVertex { path, index } => Reply::Vertex(
                usize::try_from(index)
                    .ok()
                    .and_then(|i| self.path_vertex(path, i)),
            ),
            Command::ClearPath { path } => {
                self.clear_path(path);
                Reply::Done
            }
            Command::ClearPaths => {
                self.clear_paths();
                Reply::Done
            }
            Command::SetTerrainCost { terrain, cost } => {
                match cost {
                    CostSpec::Literal(c) => self.set_terrain_cost(terrain, c),
                    CostSpec::Variable(slot) => self.set_terrain_cost_var(terrain, slot),
                };
                Reply::Done
            }
            Command::ResetTerrainCost { terrain } => {
                self.reset_terrain_cost(terrain);
                Reply::Done
            }
            Command::ClearTerrainCosts => {
                self.clear_terrain_costs();
                Reply::Done
            }
            Command::GetTerrainCost { terrain } => Reply::Cost(self.terrain_cost(terrain, host)?),
            Command::SetTransitionCost { from, to, cost } => {
                match cost {
                    CostSpec::Literal(c) => self.set_transition_cost(from, to, c),
                    CostSpec::Variable(slot) => self.set_transition_cost_var(from, to, slot),
                };
                Reply::Done
            }
            Command::ResetTransitionCost { from, to } => {
                self.reset_transition_cost(from, to);
                Reply::Done
            }
            Command::ClearTransitionCosts => {
                self.clear_transition_costs();
                Reply::Done
            }
            Command::GetTransitionCost { from, to } => {
                Reply::Cost(self.transition_cost(from, to, host)?)
            }
            Command::SaveCosts => {
                let mut buf = Vec::new();
                self.save_costs(&mut buf)?;
                Reply::Saved(buf)
            }
            Command::LoadCosts(bytes) => {
                self.load_costs(bytes.as_slice())?;
                Reply::Done
            }
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::service::tests::TestHost;

    #[test]
    fn find_then_walk_the_path() {
        let host = TestHost::open(5, 5);
        let mut pf = Pathfeeder::default();
        let reply = pf
            .execute(
                &host,
                Command::FindPath {
                    mover: Mover::Hero,
                    dest: Point::new(4, 4),
                },
            )
            .unwrap();
        assert!(reply.is_success());
        let Reply::Path(Some(path)) = reply else {
            panic!("expected a path, got {reply:?}");
        };

        let len = pf.execute(&host, Command::PathLength { path }).unwrap();
        assert_eq!(len, Reply::Length(Some(9)));

        let last = pf.execute(&host, Command::PathVertex { path, index: 8 }).unwrap();
        assert_eq!(last, Reply::Vertex(Some(Point::new(4, 4))));
    }

    #[test]
    fn misses_report_failure() {
        let host = TestHost::open(3, 3);
        let mut pf = Pathfeeder::default();
        let path = PathId::new(1);

        let r = pf.execute(&host, Command::PathLength { path }).unwrap();
        assert!(!r.is_success());

        pf.execute(
            &host,
            Command::FindPath {
                mover: Mover::Hero,
                dest: Point::new(2, 0),
            },
        )
        .unwrap();
        for index in [-1, 3, 100] {
            let r = pf.execute(&host, Command::PathVertex { path, index }).unwrap();
            assert_eq!(r, Reply::Vertex(None));
            assert!(!r.is_success());
        }

        pf.execute(&host, Command::ClearPath { path }).unwrap();
        let r = pf.execute(&host, Command::PathLength { path }).unwrap();
        assert_eq!(r, Reply::Length(None));
    }

    #[test]
    fn cost_commands() {
        let mut host = TestHost::open(2, 2);
        host.vars[2] = 6;
        let mut pf = Pathfeeder::default();

        pf.execute(
            &host,
            Command::SetTerrainCost {
                terrain: 3,
                cost: CostSpec::Literal(5),
            },
        )
        .unwrap();
        assert_eq!(
            pf.execute(&host, Command::GetTerrainCost { terrain: 3 }).unwrap(),
            Reply::Cost(5)
        );

        pf.execute(
            &host,
            Command::SetTerrainCost {
                terrain: 3,
                cost: CostSpec::Variable(2),
            },
        )
        .unwrap();
        assert_eq!(
            pf.execute(&host, Command::GetTerrainCost { terrain: 3 }).unwrap(),
            Reply::Cost(6)
        );

        pf.execute(&host, Command::ResetTerrainCost { terrain: 3 }).unwrap();
        pf.execute(&host, Command::ResetTerrainCost { terrain: 3 }).unwrap();
        assert_eq!(
            pf.execute(&host, Command::GetTerrainCost { terrain: 3 }).unwrap(),
            Reply::Cost(3)
        );

        pf.execute(
            &host,
            Command::SetTransitionCost {
                from: 1,
                to: 2,
                cost: CostSpec::Literal(4),
            },
        )
        .unwrap();
        assert_eq!(
            pf.execute(&host, Command::GetTransitionCost { from: 1, to: 2 }).unwrap(),
            Reply::Cost(4)
        );
        pf.execute(&host, Command::ClearTransitionCosts).unwrap();
        assert_eq!(
            pf.execute(&host, Command::GetTransitionCost { from: 1, to: 2 }).unwrap(),
            Reply::Cost(0)
        );
    }

    #[test]
    fn save_load_round_trip_through_commands() {
        let host = TestHost::open(2, 2);
        let mut pf = Pathfeeder::default();
        pf.set_terrain_cost(7, 3);
        let Reply::Saved(bytes) = pf.execute(&host, Command::SaveCosts).unwrap() else {
            panic!("expected saved bytes");
        };

        pf.execute(&host, Command::ClearTerrainCosts).unwrap();
        assert!(pf.terrain_costs().is_empty());
        pf.execute(&host, Command::LoadCosts(bytes)).unwrap();
        assert_eq!(pf.terrain_costs().len(), 1);

        let err = pf.execute(&host, Command::LoadCosts(vec![1])).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn refused_cost_writes_are_silent() {
        let host = TestHost::open(2, 2);
        let mut pf = Pathfeeder::default();
        let reply = pf
            .execute(
                &host,
                Command::SetTerrainCost {
                    terrain: 3,
                    cost: CostSpec::Literal(-2),
                },
            )
            .unwrap();
        assert_eq!(reply, Reply::Done);
        assert!(pf.terrain_costs().is_empty());
        assert_eq!(
            pf.execute(&host, Command::GetTerrainCost { terrain: 3 }).unwrap(),
            Reply::Cost(3)
        );
    }

    #[test]
    fn clear_paths_restarts_handles() {
        let host = TestHost::open(3, 3);
        let mut pf = Pathfeeder::default();
        let find = Command::FindPath {
            mover: Mover::Hero,
            dest: Point::new(1, 1),
        };
        pf.execute(&host, find.clone()).unwrap();
        pf.execute(&host, find.clone()).unwrap();
        pf.execute(&host, Command::ClearPaths).unwrap();
        assert_eq!(
            pf.execute(&host, find).unwrap(),
            Reply::Path(Some(PathId::new(1)))
        );
    }
}
