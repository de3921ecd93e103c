//! Scenario file loader.
//!
//! Scenario files are whitespace-delimited and order-sensitive:
//!
//! ```text
//! CITY <name> <startingMoney>
//! STREETS <count>
//!   STREET <level> <segmentCount> <seg1> <seg2> ...
//! RESOURCES <count>
//!   RESOURCE <name> <qty>
//! BUILDINGS <count>
//!   BUILDING <typeId> <name> <streetIndex> <paramCount> <p1> <p2> ...
//! ```
//!
//! Keywords are case-sensitive. The number after `STREET` is the street's
//! level and is clamped into `[1, 3]`. Line breaks are insignificant; they
//! are only tracked for error messages.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use city_core::{City, CityError, CityResult, Street};
use tracing::info;

use crate::loaders::{LoadResult, read_file};

/// Loader building a [`City`] from a scenario file.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and build the city described in `path`.
    pub fn load(path: &Path) -> LoadResult<City> {
        let content = read_file(path)?;
        let city = Self::parse(&content)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?;

        info!(
            target: "city::content",
            path = %path.display(),
            city = city.name(),
            streets = city.streets().len(),
            buildings = city.building_count(),
            "Scenario loaded"
        );
        Ok(city)
    }

    /// Parse scenario text. Buildings go through the global registry.
    pub fn parse(content: &str) -> CityResult<City> {
        let mut tokens = Tokens::new(content);

        tokens.expect("CITY")?;
        let name = tokens.word("city name")?;
        let money: i64 = tokens.number("starting money")?;
        let mut city = City::new(name, money);

        tokens.expect("STREETS")?;
        let street_count: usize = tokens.number("street count")?;
        for _ in 0..street_count {
            tokens.expect("STREET")?;
            let level: i64 = tokens.number("street level")?;
            let segment_count: usize = tokens.number("segment count")?;
            let mut street = Street::new(level);
            for _ in 0..segment_count {
                // segments past the street's capacity are read and dropped
                street.add_segment(tokens.number("segment id")?);
            }
            city.add_street(street);
        }

        tokens.expect("RESOURCES")?;
        let resource_count: usize = tokens.number("resource count")?;
        for _ in 0..resource_count {
            tokens.expect("RESOURCE")?;
            let resource = tokens.word("resource name")?;
            let qty: i32 = tokens.number("resource quantity")?;
            city.add_resource(resource, qty)?;
        }

        tokens.expect("BUILDINGS")?;
        let building_count: usize = tokens.number("building count")?;
        for _ in 0..building_count {
            tokens.expect("BUILDING")?;
            let type_id = tokens.word("building type")?;
            let name = tokens.word("building name")?;
            let street_index: i64 = tokens.number("street index")?;
            let param_count: usize = tokens.number("parameter count")?;
            let params = (0..param_count)
                .map(|_| tokens.word("building parameter").map(str::to_string))
                .collect::<CityResult<Vec<_>>>()?;

            // negative indexes simply resolve to no street
            let street_index = usize::try_from(street_index).unwrap_or(usize::MAX);
            city.add_building(type_id, name, &params, street_index)?;
        }

        Ok(city)
    }
}

/// Whitespace tokenizer that remembers line numbers.
struct Tokens<'a> {
    iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let iter = content.lines().enumerate().flat_map(|(index, line)| {
            line.split_whitespace().map(move |token| (index + 1, token))
        });
        Self {
            iter: Box::new(iter),
            line: 1,
        }
    }

    fn word(&mut self, what: &str) -> CityResult<&'a str> {
        match self.iter.next() {
            Some((line, token)) => {
                self.line = line;
                Ok(token)
            }
            None => Err(CityError::InvalidInput(format!(
                "unexpected end of input after line {}: expected {what}",
                self.line
            ))),
        }
    }

    fn expect(&mut self, keyword: &str) -> CityResult<()> {
        let token = self.word(keyword)?;
        if token != keyword {
            return Err(CityError::InvalidInput(format!(
                "line {}: expected {keyword}, found '{token}'",
                self.line
            )));
        }
        Ok(())
    }

    fn number<T: FromStr>(&mut self, what: &str) -> CityResult<T> {
        let token = self.word(what)?;
        token.parse().map_err(|_| {
            CityError::InvalidInput(format!(
                "line {}: expected {what}, found '{token}'",
                self.line
            ))
        })
    }
}
