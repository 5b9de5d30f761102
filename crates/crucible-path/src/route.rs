//! The path a search settled on, for display and checking.

use serde::Serialize;

use crate::grid::CostGrid;
use crate::puzzle::{Heading, Mover};

/// Every block the crucible enters after leaving the start, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Route {
    steps: Vec<Mover>,
}

impl Route {
    pub fn new(steps: Vec<Mover>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Mover] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total heat loss of the entered blocks.
    pub fn cost(&self, grid: &CostGrid) -> u32 {
        self.steps
            .iter()
            .filter_map(|step| grid.cost(step.position))
            .sum()
    }

    /// Maximal stretches travelled without turning, as `(heading, length)`.
    pub fn runs(&self) -> Vec<(Heading, u32)> {
        let mut runs: Vec<(Heading, u32)> = Vec::new();
        for step in &self.steps {
            match runs.last_mut() {
                Some((heading, len)) if *heading == step.heading => *len += 1,
                _ => runs.push((step.heading, 1)),
            }
        }
        runs
    }

    /// The map with each entered block replaced by the arrow of the heading
    /// it was entered with.
    pub fn render(&self, grid: &CostGrid) -> String {
        let mut rows: Vec<Vec<char>> = grid
            .to_string()
            .lines()
            .map(|line| line.chars().collect())
            .collect();

        for step in &self.steps {
            let (Ok(x), Ok(y)) = (
                usize::try_from(step.position.x),
                usize::try_from(step.position.y),
            ) else {
                continue;
            };
            if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = step.heading.glyph();
            }
        }

        let mut out = String::with_capacity(rows.len() * (grid.width() + 1));
        for row in rows {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Position;

    fn mover(x: i32, y: i32, heading: Heading) -> Mover {
        Mover::new(Position::new(x, y), heading)
    }

    fn sample_route() -> Route {
        Route::new(vec![
            mover(1, 0, Heading::East),
            mover(2, 0, Heading::East),
            mover(2, 1, Heading::South),
            mover(2, 2, Heading::South),
        ])
    }

    #[test]
    fn test_runs() {
        assert_eq!(
            sample_route().runs(),
            vec![(Heading::East, 2), (Heading::South, 2)]
        );
        assert!(Route::default().runs().is_empty());
    }

    #[test]
    fn test_cost() {
        let grid: CostGrid = "123\n456\n789".parse().unwrap();
        assert_eq!(sample_route().cost(&grid), 2 + 3 + 6 + 9);
        assert_eq!(Route::default().cost(&grid), 0);
    }

    #[test]
    fn test_render() {
        let grid: CostGrid = "123\n456\n789".parse().unwrap();
        assert_eq!(sample_route().render(&grid), "1>>\n45v\n78v\n");
    }
}
