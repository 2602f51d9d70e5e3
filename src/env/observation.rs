use crate::game::{GameState, GridConfig, Position};

/// What an agent sees after a transition.
///
/// The grid is small enough that a single cell index is a complete
/// observation. Tabular agents can use `index` directly; function
/// approximators can widen it with `one_hot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Cell the observation points at
    pub position: Position,
    /// Row-major cell index, `y * size + x`
    pub index: usize,
}

impl Observation {
    /// One-hot encoding over an observation space of `space` cells
    pub fn one_hot(&self, space: usize) -> Vec<f32> {
        let mut encoding = vec![0.0; space];
        if self.index < space {
            encoding[self.index] = 1.0;
        }
        encoding
    }
}

/// Observation for the state's current position
pub fn create_observation(state: &GameState, config: &GridConfig) -> Observation {
    observation_at(state.position, config)
}

/// Observation for an arbitrary in-bounds cell.
///
/// Step results use this with the landing cell, which after a capture is
/// the hazard rather than the snapped-back player position.
pub fn observation_at(position: Position, config: &GridConfig) -> Observation {
    Observation {
        position,
        index: position.y as usize * config.size + position.x as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_row_major() {
        let config = GridConfig::default();
        assert_eq!(observation_at(Position::new(0, 0), &config).index, 0);
        assert_eq!(observation_at(Position::new(6, 0), &config).index, 6);
        assert_eq!(observation_at(Position::new(0, 1), &config).index, 7);
        assert_eq!(observation_at(Position::new(2, 1), &config).index, 9);
        assert_eq!(observation_at(Position::new(6, 6), &config).index, 48);
    }

    #[test]
    fn test_indices_cover_the_space_exactly_once() {
        let config = GridConfig::default();
        let mut seen = vec![false; config.num_cells()];
        for y in 0..config.size as i32 {
            for x in 0..config.size as i32 {
                let obs = observation_at(Position::new(x, y), &config);
                assert!(!seen[obs.index]);
                seen[obs.index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_one_hot_encoding() {
        let config = GridConfig::default();
        let obs = observation_at(Position::new(2, 1), &config);
        let encoding = obs.one_hot(config.num_cells());

        assert_eq!(encoding.len(), 49);
        assert_eq!(encoding[9], 1.0);
        assert_eq!(encoding.iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn test_observation_tracks_the_state() {
        let config = GridConfig::default();
        let mut state = GameState::new(config.start);
        state.position = Position::new(3, 2);

        let obs = create_observation(&state, &config);
        assert_eq!(obs.position, Position::new(3, 2));
        assert_eq!(obs.index, 17);
    }
}
