//! Screens the app can show, addressed by path.

use crate::error::{AppError, Result};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Library,
    Folder(i64),
    Match(i64),
}

impl Route {
    /// Parses `/library`, `/folder/<id>` or `/match/<id>`. `/` is the library.
    pub fn parse(path: &str) -> Result<Route> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let parse_id = |raw: &str| {
            raw.parse::<i64>()
                .map_err(|_| AppError::InvalidRoute(path.to_string()))
        };

        match segments.as_slice() {
            [] | ["library"] => Ok(Route::Library),
            ["folder", id] => Ok(Route::Folder(parse_id(*id)?)),
            ["match", id] => Ok(Route::Match(parse_id(*id)?)),
            _ => Err(AppError::InvalidRoute(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Library => write!(f, "/library"),
            Route::Folder(id) => write!(f, "/folder/{}", id),
            Route::Match(id) => write!(f, "/match/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/library").unwrap(), Route::Library);
        assert_eq!(Route::parse("/").unwrap(), Route::Library);
        assert_eq!(Route::parse("").unwrap(), Route::Library);
        assert_eq!(Route::parse("/folder/4").unwrap(), Route::Folder(4));
        assert_eq!(Route::parse("match/12/").unwrap(), Route::Match(12));
    }

    #[test]
    fn test_display_matches_parse() {
        for route in [Route::Library, Route::Folder(3), Route::Match(8)] {
            assert_eq!(Route::parse(&route.to_string()).unwrap(), route);
        }
        assert_eq!(Route::Folder(3).to_string(), "/folder/3");
    }

    #[test]
    fn test_invalid_routes() {
        assert!(matches!(
            Route::parse("/match/abc"),
            Err(AppError::InvalidRoute(_))
        ));
        assert!(Route::parse("/deck/1").is_err());
        assert!(Route::parse("/folder").is_err());
        assert!(Route::parse("/folder/1/extra").is_err());
    }
}
