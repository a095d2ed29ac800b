//! Four-pillars (四柱) charts and luck pillars (大運) from precomputed
//! calendar tables.
//!
//! Given a birth date, an optional clock time and a gender, the engine looks
//! up the year, month and day pillars in a calendar table, derives the hour
//! pillar, annotates every stem with its ten-relation (十神) and twelve-phase
//! (十二運星), and lays out ten luck pillars whose starting age is measured
//! against the solar terms (節氣) of the birth year.
//!
//! # Examples
//!
//! ```
//! use kolonaro::{BirthInput, Date, Engine, Moment};
//! use kolonaro::tables::{CalendarRow, CalendarTable, SolarTerm, SolarTermTable};
//!
//! let calendar = CalendarTable::from_rows([CalendarRow {
//!     date: Date::from_gregorian(1990, 5, 15).unwrap(),
//!     year: "庚午".into(),
//!     month: "辛巳".into(),
//!     day: "庚辰".into(),
//! }]);
//! let at = Moment::new(Date::from_gregorian(1990, 5, 21).unwrap(), 13, 37, 0).unwrap();
//! let solar_terms = SolarTermTable::from_years([(1990, vec![SolarTerm { name: "소만".into(), at }])]);
//!
//! let engine = Engine::new(calendar, solar_terms);
//! let input = BirthInput::new(1990, 5, 15, Some(10), Some(30), 1, "홍길동").unwrap();
//! let chart = engine.compute(&input).unwrap();
//!
//! assert_eq!("辛巳", chart.pillars.hour.unwrap().pillar.to_string());
//! assert_eq!(2, chart.luck.start.rounded);
//! assert_eq!("만 1세부터 壬午 대운 시작 (1991)", chart.luck.entries[0].label);
//! ```
//!
//! The tables are plain data supplied by the caller; see [`tables`] for the
//! lookup traits and the CSV / JSON loaders.

pub mod config;
pub mod date;
pub mod error;
pub mod ganzhi;
pub mod saju;
pub mod tables;

pub use config::Config;
pub use date::{Date, Moment};
pub use error::{Error, Result};
pub use saju::{BirthInput, Chart, Engine, Gender};
