//! The engine: the command surface a host drives.  An `Engine` owns one repository's object
//! store, working tree, staging index and HEAD, and exposes `write`, `read`, `add`, `commit`,
//! `restore`, `log` and `snapshot` over them.
//!
//! # Examples
//!
//! ```
//! use twig::{Engine, EngineConfig, FixedClock};
//!
//! let config = EngineConfig::from_json(r#"{"name": "dev", "email": "dev@example.com"}"#).unwrap();
//! let mut engine = Engine::with_clock(config, FixedClock(1585000000));
//!
//! engine.write("a.txt", b"hello".to_vec()).unwrap();
//! engine.add("a.txt").unwrap();
//! let hash = engine.commit("first").unwrap();
//!
//! let log = engine.log().unwrap();
//! assert_eq!(log.len(), 1);
//! assert_eq!(log[0].hash, hash);
//! assert_eq!(log[0].commit.author.to_string(), "dev <dev@example.com> 1585000000 +0000");
//! ```

mod clock;
mod config;
mod engine;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::config::EngineConfig;
pub use self::engine::{Engine, LogEntry};
