use std::str::FromStr;

use crate::{Error, Grid, Marker};

impl From<char> for Marker {
    fn from(ch: char) -> Self {
        match ch {
            'S' => Marker::Start,
            'F' => Marker::Finish,
            '0' => Marker::Blocked,
            _ => Marker::Open,
        }
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().collect::<Vec<_>>();
        // Trailing blank lines are not rows.
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let rows = lines
            .iter()
            .map(|line| line.chars().map(Marker::from).collect())
            .collect();
        Grid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Endpoint, Error, Grid, Marker, Pos};

    #[test]
    fn any_other_character_is_open() {
        let grid = "S x#\n0..F\n".parse::<Grid>().unwrap();
        assert_eq!((grid.height(), grid.width()), (2, 4));
        assert_eq!(grid.start(), Pos(0, 0));
        assert_eq!(grid.finish(), Pos(1, 3));
        assert_eq!(grid[Pos(0, 1)], Marker::Open);
        assert_eq!(grid[Pos(0, 3)], Marker::Open);
        assert_eq!(grid[Pos(1, 0)], Marker::Blocked);
    }

    #[test]
    fn crlf_and_trailing_blank_lines() {
        let grid = "S.\r\n.F\r\n\r\n\n".parse::<Grid>().unwrap();
        assert_eq!((grid.height(), grid.width()), (2, 2));
    }

    #[test]
    fn missing_endpoints() {
        assert_eq!(
            "..F".parse::<Grid>(),
            Err(Error::MissingEndpoint {
                endpoint: Endpoint::Start
            })
        );
        assert_eq!(
            "S..".parse::<Grid>(),
            Err(Error::MissingEndpoint {
                endpoint: Endpoint::Finish
            })
        );
        assert_eq!(
            "".parse::<Grid>(),
            Err(Error::MissingEndpoint {
                endpoint: Endpoint::Start
            })
        );
    }

    #[test]
    fn duplicate_endpoints() {
        assert_eq!(
            "S.F\n.S.".parse::<Grid>(),
            Err(Error::DuplicateEndpoint {
                endpoint: Endpoint::Start,
                first: Pos(0, 0),
                second: Pos(1, 1),
            })
        );
        assert_eq!(
            "FSF".parse::<Grid>(),
            Err(Error::DuplicateEndpoint {
                endpoint: Endpoint::Finish,
                first: Pos(0, 0),
                second: Pos(0, 2),
            })
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = "S...\n..\n...F".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            Error::RaggedRow {
                line: 2,
                expected: 4,
                found: 2,
            }
        );
        assert_eq!(err.to_string(), "Row 2 has 2 cells, expecting width 4");
    }
}
