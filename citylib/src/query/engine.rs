//! Query engine: joins, groupings, filters and aggregates over a dataset.
//!
//! `CityQuery` borrows a `Dataset` and never mutates it. Every operation
//! returns an empty result on empty input rather than failing; the only
//! errors are explicit divisions by zero.
//!
//! Joins follow house store order: when houses are joined to blocks via
//! the associations, the houses of each block come out in the order they
//! appear in the house collection.

use std::collections::HashSet;

use tracing::debug;

use crate::data::dataset::Dataset;
use crate::data::model::{Block, House, ProjectType};
use crate::error::CityError;
use crate::Result;

use super::options::PercentBase;
use super::results::{AddressLookup, BlockHouses, Group};
use super::sample::IndexSource;

/// Read-only query surface over a dataset.
#[derive(Debug, Clone, Copy)]
pub struct CityQuery<'a> {
    dataset: &'a Dataset,
}

/// Group houses by `key`, keeping groups in first-seen key order.
fn group_first_seen<'a, K, I, F>(houses: I, key: F) -> Vec<Group<'a, K>>
where
    K: PartialEq,
    I: IntoIterator<Item = &'a House>,
    F: Fn(&House) -> K,
{
    let mut groups: Vec<Group<'a, K>> = Vec::new();
    for house in houses {
        let k = key(house);
        match groups.iter_mut().find(|g| g.key == k) {
            Some(group) => group.houses.push(house),
            None => groups.push(Group {
                key: k,
                houses: vec![house],
            }),
        }
    }
    groups
}

impl<'a> CityQuery<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Inner join of houses and associations: (block code, house) pairs
    /// in house store order.
    fn linked_houses(&self) -> Vec<(&'a str, &'a House)> {
        let links = self.dataset.links();
        self.dataset
            .houses()
            .iter()
            .flat_map(|house| {
                links
                    .iter()
                    .filter(move |l| l.house_code == house.code)
                    .map(move |l| (l.block_code.as_str(), house))
            })
            .collect()
    }

    /// Houses joined to one block code.
    fn houses_in_block(&self, block_code: &str) -> Vec<&'a House> {
        self.linked_houses()
            .into_iter()
            .filter(|(code, _)| *code == block_code)
            .map(|(_, house)| house)
            .collect()
    }

    /// All blocks in store order.
    pub fn blocks(&self) -> &'a [Block] {
        self.dataset.blocks()
    }

    /// Every block with the houses joined to it.
    ///
    /// Blocks without houses get an empty list; houses without a block
    /// are left out.
    pub fn full_info(&self) -> Vec<BlockHouses<'a>> {
        let linked = self.linked_houses();
        let info: Vec<BlockHouses<'a>> = self
            .dataset
            .blocks()
            .iter()
            .map(|block| BlockHouses {
                block,
                houses: linked
                    .iter()
                    .filter(|(code, _)| *code == block.code)
                    .map(|(_, house)| *house)
                    .collect(),
            })
            .collect();
        debug!(blocks = info.len(), "full city info");
        info
    }

    /// Total area of all blocks, summed in store order.
    pub fn city_area(&self) -> f64 {
        self.dataset
            .blocks()
            .iter()
            .fold(0.0, |sum, block| sum + block.area)
    }

    /// Total inhabitants divided by the city area.
    ///
    /// Fails with `DivisionByZero` when the city area is zero, which
    /// includes the case of no blocks at all, and with `Overflow` when
    /// the summed area is not finite.
    pub fn area_per_inhabitant(&self) -> Result<f64> {
        let area = self.city_area();
        if !area.is_finite() {
            return Err(CityError::Overflow {
                operation: "area_per_inhabitant",
            });
        }
        if area == 0.0 {
            return Err(CityError::DivisionByZero {
                operation: "area_per_inhabitant",
            });
        }
        let inhabitants: u64 = self
            .dataset
            .blocks()
            .iter()
            .map(|b| u64::from(b.inhabitants))
            .sum();
        Ok(inhabitants as f64 / area)
    }

    /// Houses grouped by project type.
    pub fn houses_by_type(&self) -> Vec<Group<'a, ProjectType>> {
        group_first_seen(self.dataset.houses(), |h| h.project_type)
    }

    /// Houses grouped by floor count, keeping only the `targets` groups.
    pub fn houses_by_floors(&self, targets: &[u32]) -> Vec<Group<'a, u32>> {
        let mut groups = group_first_seen(self.dataset.houses(), |h| h.floors);
        groups.retain(|g| targets.contains(&g.key));
        groups
    }

    /// Houses built strictly after `year`, in store order.
    pub fn recent_houses(&self, year: i32) -> Vec<&'a House> {
        let houses: Vec<&'a House> = self
            .dataset
            .houses()
            .iter()
            .filter(|h| h.year() > year)
            .collect();
        debug!(year, matched = houses.len(), "recent houses");
        houses
    }

    /// Houses whose code contains `digit`.
    pub fn houses_matching(&self, digit: &str) -> Vec<&'a House> {
        self.dataset
            .houses()
            .iter()
            .filter(|h| h.code.contains(digit))
            .collect()
    }

    /// Distinct project types of houses with at least `floors` floors.
    pub fn types_at_or_above(&self, floors: u32) -> Vec<ProjectType> {
        let mut types = Vec::new();
        for house in self.dataset.houses().iter().filter(|h| h.floors >= floors) {
            if !types.contains(&house.project_type) {
                types.push(house.project_type);
            }
        }
        types
    }

    /// Administration address of the block a house belongs to.
    pub fn administration_address(&self, house_code: &str) -> AddressLookup<'a> {
        let Some(block_code) = self.dataset.block_code_of(house_code) else {
            debug!(house = house_code, "no association for house");
            return AddressLookup::HouseNotFound;
        };

        match self.dataset.block(block_code) {
            Some(block) => AddressLookup::Found(&block.administration_address),
            None => {
                debug!(house = house_code, block = block_code, "block is unknown");
                AddressLookup::BlockNotFound
            }
        }
    }

    /// Block with the most inhabitants; the first one wins ties.
    pub fn largest_block(&self) -> Option<&'a Block> {
        self.dataset
            .blocks()
            .iter()
            .fold(None, |best: Option<&'a Block>, block| match best {
                Some(current) if current.inhabitants >= block.inhabitants => Some(current),
                _ => Some(block),
            })
    }

    /// Houses of the most populated block.
    pub fn largest_block_houses(&self) -> Vec<&'a House> {
        match self.largest_block() {
            Some(block) => self.houses_in_block(&block.code),
            None => Vec::new(),
        }
    }

    /// The `n` oldest houses by creation year.
    ///
    /// Houses built in the same year keep their store order.
    pub fn oldest_houses(&self, n: usize) -> Vec<&'a House> {
        let mut houses: Vec<&'a House> = self.dataset.houses().iter().collect();
        houses.sort_by_key(|h| h.year());
        houses.truncate(n);
        houses
    }

    /// Share of high-rise houses in a block, as a truncated percentage.
    ///
    /// The numerator is the number of high-rise houses joined to
    /// `block_code`; `base` selects the denominator. A block with no
    /// joined houses yields 0. A zero denominator fails with
    /// `DivisionByZero`. The result is capped at 100, which only
    /// `BlockGroups` can reach past (it counts blocks, not houses).
    pub fn percent_high_rise(&self, block_code: &str, base: PercentBase) -> Result<u32> {
        let linked = self.linked_houses();
        let in_block: Vec<&House> = linked
            .iter()
            .filter(|(code, _)| *code == block_code)
            .map(|(_, house)| *house)
            .collect();

        if in_block.is_empty() {
            return Ok(0);
        }

        let high_rise = in_block
            .iter()
            .filter(|h| h.project_type == ProjectType::HighRise)
            .count();

        let denominator = match base {
            PercentBase::AllLinkedHouses => linked.len(),
            PercentBase::BlockGroups => linked
                .iter()
                .map(|(code, _)| *code)
                .collect::<HashSet<_>>()
                .len(),
            PercentBase::BlockHouses => in_block.len(),
        };

        if denominator == 0 {
            return Err(CityError::DivisionByZero {
                operation: "percent_high_rise",
            });
        }

        let percent = (high_rise * 100 / denominator).min(100);
        debug!(
            block = block_code,
            high_rise,
            denominator,
            base = base.as_str(),
            percent,
            "high-rise share"
        );
        Ok(percent as u32)
    }

    /// Blocks containing at least one house with more than one entrance.
    pub fn blocks_with_multi_entrance_houses(&self) -> Vec<&'a Block> {
        let multi: HashSet<&str> = self
            .dataset
            .houses()
            .iter()
            .filter(|h| h.entrances > 1)
            .map(|h| h.code.as_str())
            .collect();

        let links = self.dataset.links();
        self.dataset
            .blocks()
            .iter()
            .filter(|block| {
                links
                    .iter()
                    .any(|l| l.block_code == block.code && multi.contains(l.house_code.as_str()))
            })
            .collect()
    }

    /// Draw `count` houses with replacement.
    fn sample_houses<S>(&self, count: usize, source: &mut S) -> Vec<&'a House>
    where
        S: IndexSource + ?Sized,
    {
        let houses = self.dataset.houses();
        (0..count)
            .map(|_| &houses[source.pick_index(houses.len())])
            .collect()
    }

    /// Block holding the most houses common to two random samples.
    ///
    /// Two samples of half the houses each are drawn with replacement.
    /// Their intersection by code is matched against the associations,
    /// and the block with the highest positive count is returned (the
    /// first block in store order on ties). Returns `None` when there
    /// are no houses or no block contains any common house.
    pub fn random_overlap_block<S>(&self, source: &mut S) -> Option<&'a Block>
    where
        S: IndexSource + ?Sized,
    {
        let total = self.dataset.houses().len();
        if total == 0 {
            return None;
        }

        let first = self.sample_houses(total / 2, source);
        let second = self.sample_houses(total / 2, source);

        let second_codes: HashSet<&str> = second.iter().map(|h| h.code.as_str()).collect();
        let mut overlap: Vec<&str> = Vec::new();
        for house in &first {
            let code = house.code.as_str();
            if second_codes.contains(code) && !overlap.contains(&code) {
                overlap.push(code);
            }
        }
        debug!(overlap = ?overlap, "sample overlap");

        let links = self.dataset.links();
        let mut best: Option<(&'a Block, usize)> = None;
        for block in self.dataset.blocks() {
            let count = links
                .iter()
                .filter(|l| l.block_code == block.code && overlap.contains(&l.house_code.as_str()))
                .count();
            if count > 0 && best.map_or(true, |(_, top)| count > top) {
                best = Some((block, count));
            }
        }

        best.map(|(block, _)| block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::HouseToBlock;
    use crate::data::seed;
    use crate::query::sample::ScriptedIndices;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reference() -> Dataset {
        seed::reference(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()).unwrap()
    }

    fn codes(houses: &[&House]) -> Vec<String> {
        houses.iter().map(|h| h.code.clone()).collect()
    }

    fn house(code: &str, ty: ProjectType, floors: u32, entrances: u32, year: i32) -> House {
        House::new(
            code,
            ty,
            floors,
            entrances,
            NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_blocks_in_store_order() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        let blocks: Vec<&str> = q.blocks().iter().map(|b| b.code.as_str()).collect();
        assert_eq!(blocks, vec!["N120", "S200", "W186", "E192"]);
    }

    #[test]
    fn test_full_info() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        let info = q.full_info();

        assert_eq!(info.len(), 4);
        assert_eq!(info[0].name(), "North");
        assert_eq!(codes(&info[0].houses), vec!["65c", "11a", "11c"]);
        assert_eq!(info[1].name(), "South");
        assert_eq!(codes(&info[1].houses), vec!["70/1", "70/3", "9", "11b"]);
        assert_eq!(codes(&info[2].houses), vec!["47", "65a", "11/3"]);
        assert_eq!(codes(&info[3].houses), vec!["68/1", "8", "65b"]);
    }

    #[test]
    fn test_full_info_lists_are_disjoint_subsets() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        let all: HashSet<&str> = ds.houses().iter().map(|h| h.code.as_str()).collect();

        let mut seen = HashSet::new();
        for entry in q.full_info() {
            for house in entry.houses {
                assert!(seen.insert(house.code.as_str()), "{} listed twice", house.code);
                assert!(all.contains(house.code.as_str()));
            }
        }
        assert_eq!(seen.len(), 13);
    }

    #[test]
    fn test_full_info_empty_block_and_unlinked_house() {
        let ds = Dataset::new(
            vec![
                house("a", ProjectType::Cottage, 1, 1, 2000),
                house("loose", ProjectType::Cottage, 1, 1, 2000),
            ],
            vec![
                Block::new("X", "Ex", "x", 1, 1.0),
                Block::new("Y", "Why", "y", 1, 1.0),
            ],
            vec![HouseToBlock::new("a", "X")],
        )
        .unwrap();
        let info = CityQuery::new(&ds).full_info();

        assert_eq!(codes(&info[0].houses), vec!["a"]);
        assert!(info[1].houses.is_empty());
    }

    #[test]
    fn test_city_area() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        let expected = [10.5, 32.1, 29.47, 27.14]
            .iter()
            .fold(0.0, |sum: f64, a| sum + a);
        assert_eq!(q.city_area(), expected);
        assert!((q.city_area() - 99.21).abs() < 1e-9);
    }

    #[test]
    fn test_city_area_empty() {
        let ds = Dataset::empty();
        assert_eq!(CityQuery::new(&ds).city_area(), 0.0);
    }

    #[test]
    fn test_area_per_inhabitant() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        let value = q.area_per_inhabitant().unwrap();
        assert!((value - 59052.0 / q.city_area()).abs() < 1e-9);
    }

    #[test]
    fn test_area_per_inhabitant_without_blocks_fails() {
        let ds = Dataset::empty();
        let err = CityQuery::new(&ds).area_per_inhabitant().unwrap_err();
        assert!(matches!(
            err,
            CityError::DivisionByZero {
                operation: "area_per_inhabitant"
            }
        ));
    }

    #[test]
    fn test_area_per_inhabitant_overflowing_area_fails() {
        let ds = Dataset::new(
            vec![],
            vec![
                Block::new("X", "Ex", "x", 10, f64::MAX),
                Block::new("Y", "Why", "y", 10, f64::MAX),
            ],
            vec![],
        )
        .unwrap();
        let q = CityQuery::new(&ds);
        assert!(q.city_area().is_infinite());
        assert!(matches!(
            q.area_per_inhabitant().unwrap_err(),
            CityError::Overflow {
                operation: "area_per_inhabitant"
            }
        ));
    }

    #[test]
    fn test_houses_by_type() {
        let ds = reference();
        let groups = CityQuery::new(&ds).houses_by_type();

        let keys: Vec<ProjectType> = groups.iter().map(|g| g.key).collect();
        assert_eq!(
            keys,
            vec![
                ProjectType::HighRise,
                ProjectType::OneStory,
                ProjectType::Hostel,
                ProjectType::Cottage
            ]
        );
        assert_eq!(
            codes(&groups[0].houses),
            vec!["70/1", "70/3", "68/1", "47", "11/3"]
        );
    }

    #[test]
    fn test_houses_by_type_partitions_houses() {
        let ds = reference();
        let groups = CityQuery::new(&ds).houses_by_type();

        let total: usize = groups.iter().map(|g| g.houses.len()).sum();
        assert_eq!(total, ds.houses().len());
        for group in &groups {
            assert!(group.houses.iter().all(|h| h.project_type == group.key));
        }
        let union: HashSet<&str> = groups
            .iter()
            .flat_map(|g| g.houses.iter().map(|h| h.code.as_str()))
            .collect();
        assert_eq!(union.len(), ds.houses().len());
    }

    #[test]
    fn test_houses_by_floors() {
        let ds = reference();
        let groups = CityQuery::new(&ds).houses_by_floors(&[1, 9]);

        assert_eq!(groups.len(), 2);
        // 9-story houses appear first in store order
        assert_eq!(groups[0].key, 9);
        assert_eq!(codes(&groups[0].houses), vec!["68/1", "47", "65a"]);
        assert_eq!(groups[1].key, 1);
        assert_eq!(codes(&groups[1].houses), vec!["9", "8", "11b"]);
    }

    #[test]
    fn test_houses_by_floors_no_match() {
        let ds = reference();
        assert!(CityQuery::new(&ds).houses_by_floors(&[42]).is_empty());
        assert!(CityQuery::new(&ds).houses_by_floors(&[]).is_empty());
    }

    #[test]
    fn test_recent_houses() {
        let ds = reference();
        let recent = CityQuery::new(&ds).recent_houses(2015);
        assert_eq!(codes(&recent), vec!["47", "9", "8", "11a", "11c", "11b"]);
    }

    #[test]
    fn test_recent_houses_ignores_store_order() {
        // Unsorted dates: a sort-then-take-while would stop at "old".
        let ds = Dataset::new(
            vec![
                house("new1", ProjectType::Cottage, 1, 1, 2020),
                house("old", ProjectType::Cottage, 1, 1, 1990),
                house("new2", ProjectType::Cottage, 1, 1, 2021),
            ],
            vec![],
            vec![],
        )
        .unwrap();
        let recent = CityQuery::new(&ds).recent_houses(2015);
        assert_eq!(codes(&recent), vec!["new1", "new2"]);
    }

    #[test]
    fn test_houses_matching() {
        let ds = reference();
        let happy = CityQuery::new(&ds).houses_matching("7");
        assert_eq!(codes(&happy), vec!["70/1", "70/3", "47"]);
        assert!(CityQuery::new(&ds).houses_matching("x").is_empty());
    }

    #[test]
    fn test_types_at_or_above() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        assert_eq!(
            q.types_at_or_above(5),
            vec![ProjectType::HighRise, ProjectType::Hostel]
        );
        assert_eq!(q.types_at_or_above(1).len(), 4);
        assert!(q.types_at_or_above(10).is_empty());
    }

    #[test]
    fn test_administration_address() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        assert_eq!(
            q.administration_address("70/1"),
            AddressLookup::Found("Cloud, 22")
        );
        assert_eq!(
            q.administration_address("65b").address(),
            Some("Center, 13d")
        );
        assert_eq!(
            q.administration_address("nonexistent"),
            AddressLookup::HouseNotFound
        );
    }

    #[test]
    fn test_administration_address_unknown_block() {
        let ds = Dataset::new(
            vec![house("a", ProjectType::Cottage, 1, 1, 2000)],
            vec![],
            vec![HouseToBlock::new("a", "GONE")],
        )
        .unwrap();
        let q = CityQuery::new(&ds);
        assert_eq!(q.administration_address("a"), AddressLookup::BlockNotFound);
        assert_eq!(q.administration_address("a").address(), None);
    }

    #[test]
    fn test_largest_block_houses() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        assert_eq!(q.largest_block().unwrap().code, "S200");
        assert_eq!(
            codes(&q.largest_block_houses()),
            vec!["70/1", "70/3", "9", "11b"]
        );
    }

    #[test]
    fn test_largest_block_tie_takes_first() {
        let ds = Dataset::new(
            vec![
                house("a", ProjectType::Cottage, 1, 1, 2000),
                house("b", ProjectType::Cottage, 1, 1, 2000),
            ],
            vec![
                Block::new("X", "Ex", "x", 10, 1.0),
                Block::new("Y", "Why", "y", 10, 1.0),
            ],
            vec![HouseToBlock::new("a", "Y"), HouseToBlock::new("b", "X")],
        )
        .unwrap();
        let q = CityQuery::new(&ds);
        assert_eq!(q.largest_block().unwrap().code, "X");
        assert_eq!(codes(&q.largest_block_houses()), vec!["b"]);
    }

    #[test]
    fn test_largest_block_houses_empty() {
        let ds = Dataset::empty();
        assert!(CityQuery::new(&ds).largest_block_houses().is_empty());

        let ds = Dataset::new(vec![], vec![Block::new("X", "Ex", "x", 1, 1.0)], vec![]).unwrap();
        assert!(CityQuery::new(&ds).largest_block_houses().is_empty());
    }

    #[test]
    fn test_oldest_houses() {
        let ds = reference();
        let top = CityQuery::new(&ds).oldest_houses(10);

        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].year() <= w[1].year()));
        assert_eq!(
            codes(&top),
            vec!["65b", "70/3", "70/1", "65a", "11/3", "68/1", "65c", "8", "11c", "9"]
        );
    }

    #[test]
    fn test_oldest_houses_more_than_available() {
        let ds = reference();
        assert_eq!(CityQuery::new(&ds).oldest_houses(50).len(), 13);
        assert!(CityQuery::new(&ds).oldest_houses(0).is_empty());
    }

    #[test]
    fn test_percent_high_rise_bases() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        // W186 holds 11/3, 47 (high-rise) and 65a
        assert_eq!(
            q.percent_high_rise("W186", PercentBase::AllLinkedHouses)
                .unwrap(),
            15
        );
        assert_eq!(
            q.percent_high_rise("W186", PercentBase::BlockGroups).unwrap(),
            50
        );
        assert_eq!(
            q.percent_high_rise("W186", PercentBase::BlockHouses).unwrap(),
            66
        );
    }

    #[test]
    fn test_percent_high_rise_no_houses() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        assert_eq!(
            q.percent_high_rise("N120", PercentBase::BlockHouses).unwrap(),
            0
        );
        assert_eq!(
            q.percent_high_rise("NOPE", PercentBase::AllLinkedHouses)
                .unwrap(),
            0
        );

        let empty = Dataset::empty();
        assert_eq!(
            CityQuery::new(&empty)
                .percent_high_rise("W186", PercentBase::BlockGroups)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_percent_high_rise_is_bounded() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        for block in ds.blocks() {
            for base in [
                PercentBase::AllLinkedHouses,
                PercentBase::BlockGroups,
                PercentBase::BlockHouses,
            ] {
                assert!(q.percent_high_rise(&block.code, base).unwrap() <= 100);
            }
        }
    }

    #[test]
    fn test_percent_high_rise_block_groups_capped() {
        // one block group against three high-rise houses
        let ds = Dataset::new(
            vec![
                house("a", ProjectType::HighRise, 9, 2, 2000),
                house("b", ProjectType::HighRise, 9, 2, 2001),
                house("c", ProjectType::HighRise, 9, 2, 2002),
            ],
            vec![Block::new("X", "Ex", "x", 100, 1.0)],
            vec![
                HouseToBlock::new("a", "X"),
                HouseToBlock::new("b", "X"),
                HouseToBlock::new("c", "X"),
            ],
        )
        .unwrap();
        let q = CityQuery::new(&ds);
        assert_eq!(
            q.percent_high_rise("X", PercentBase::BlockGroups).unwrap(),
            100
        );
        assert_eq!(
            q.percent_high_rise("X", PercentBase::BlockHouses).unwrap(),
            100
        );
    }

    #[test]
    fn test_blocks_with_multi_entrance_houses() {
        let ds = reference();
        let blocks = CityQuery::new(&ds).blocks_with_multi_entrance_houses();
        let codes: Vec<&str> = blocks.iter().map(|b| b.code.as_str()).collect();
        assert_eq!(codes, vec!["S200", "W186", "E192"]);
    }

    #[test]
    fn test_random_overlap_block_scripted() {
        let ds = reference();
        let q = CityQuery::new(&ds);

        // first: 70/1 70/3 68/1 47 9 8; second: 70/1 70/3 9 11b 11b 11b
        let mut source = ScriptedIndices::new(vec![0, 1, 2, 3, 4, 5, 0, 1, 4, 12, 12, 12]);
        assert_eq!(q.random_overlap_block(&mut source).unwrap().code, "S200");

        let mut source = ScriptedIndices::new(vec![6]);
        assert_eq!(q.random_overlap_block(&mut source).unwrap().code, "W186");
    }

    #[test]
    fn test_random_overlap_block_tie_goes_to_store_order() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        // overlap is {11/3 (W186), 70/1 (S200)}, one house each
        let mut source = ScriptedIndices::new(vec![9, 0, 9, 0, 9, 0]);
        assert_eq!(q.random_overlap_block(&mut source).unwrap().code, "S200");
    }

    #[test]
    fn test_random_overlap_block_no_overlap() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        let mut source = ScriptedIndices::new(vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);
        assert!(q.random_overlap_block(&mut source).is_none());
    }

    #[test]
    fn test_random_overlap_block_empty_houses() {
        let ds = Dataset::new(vec![], vec![Block::new("X", "Ex", "x", 1, 1.0)], vec![]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(CityQuery::new(&ds).random_overlap_block(&mut rng).is_none());
    }

    #[test]
    fn test_random_overlap_block_with_rng_is_a_candidate() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..20 {
            if let Some(block) = q.random_overlap_block(&mut rng) {
                assert!(ds.blocks().iter().any(|b| b.code == block.code));
            }
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        let ds = reference();
        let q = CityQuery::new(&ds);
        assert_eq!(q.full_info(), q.full_info());
        assert_eq!(q.houses_by_type(), q.houses_by_type());
        assert_eq!(q.houses_by_floors(&[1, 9]), q.houses_by_floors(&[1, 9]));
        assert_eq!(q.recent_houses(2015), q.recent_houses(2015));
        assert_eq!(q.oldest_houses(10), q.oldest_houses(10));
        assert_eq!(
            q.blocks_with_multi_entrance_houses(),
            q.blocks_with_multi_entrance_houses()
        );
        assert_eq!(
            q.percent_high_rise("W186", PercentBase::default()).unwrap(),
            q.percent_high_rise("W186", PercentBase::default()).unwrap()
        );
    }

    #[test]
    fn test_empty_dataset_lists_are_empty() {
        let ds = Dataset::empty();
        let q = CityQuery::new(&ds);
        assert!(q.blocks().is_empty());
        assert!(q.full_info().is_empty());
        assert!(q.houses_by_type().is_empty());
        assert!(q.recent_houses(0).is_empty());
        assert!(q.houses_matching("7").is_empty());
        assert!(q.types_at_or_above(0).is_empty());
        assert!(q.oldest_houses(10).is_empty());
        assert!(q.blocks_with_multi_entrance_houses().is_empty());
        assert_eq!(
            q.administration_address("70/1"),
            AddressLookup::HouseNotFound
        );
    }
}
