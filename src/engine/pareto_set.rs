// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use std::slice::Iter as SliceIter;

/// A set of elements where no element is dominated by another one.
///
/// `left_dominance_exist(left, right)` must return `true` if `left` is
/// strictly better than `right` on at least one criterion.
/// An element is rejected when it is not better than some element of the
/// set on any criterion, so among equal elements the first one added is kept.
pub struct ParetoSet<T, C> {
    elements: Vec<T>,
    left_dominance_exist: C,
}

impl<T, C> ParetoSet<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    pub fn new(left_dominance_exist: C) -> Self {
        Self {
            elements: Vec::new(),
            left_dominance_exist,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns `true` if an element of the set is at least as good as
    /// `candidate` on every criterion.
    pub fn dominates(&self, candidate: &T) -> bool {
        self.elements
            .iter()
            .any(|old| !(self.left_dominance_exist)(candidate, old))
    }

    /// Adds `candidate` unless it is dominated, and removes the elements it
    /// dominates. Returns `true` if `candidate` was added.
    pub fn add(&mut self, candidate: T) -> bool {
        if self.dominates(&candidate) {
            return false;
        }
        let left_dominance_exist = &self.left_dominance_exist;
        self.elements
            .retain(|old| left_dominance_exist(old, &candidate));
        self.elements.push(candidate);
        true
    }

    pub fn iter(&self) -> SliceIter<'_, T> {
        self.elements.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: std::fmt::Debug, C> std::fmt::Debug for ParetoSet<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // (duration, nb_of_rides), lower is better for both
    fn left_dominance_exist(left: &(i32, u8), right: &(i32, u8)) -> bool {
        left.0 < right.0 || left.1 < right.1
    }

    #[test]
    fn dominated_elements_are_removed() {
        let mut set = ParetoSet::new(left_dominance_exist);
        assert!(set.add((600, 2)));
        assert!(set.add((300, 3)));
        assert_eq!(set.len(), 2);
        assert!(set.add((300, 1)));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![&(300, 1)]);
        assert!(!set.add((400, 2)));
    }

    #[test]
    fn adding_an_equal_element_keeps_the_first_one() {
        // the third field identifies the element and is not a criterion
        let mut set = ParetoSet::new(|left: &(i32, u8, usize), right: &(i32, u8, usize)| {
            left.0 < right.0 || left.1 < right.1
        });
        assert!(set.add((300, 1, 0)));
        assert!(!set.add((300, 1, 1)));
        assert_eq!(set.into_vec(), vec![(300, 1, 0)]);
    }

    #[test]
    fn adding_twice_is_idempotent() {
        let mut once = ParetoSet::new(left_dominance_exist);
        let mut twice = ParetoSet::new(left_dominance_exist);
        for element in [(600, 0), (300, 2), (450, 1)].iter() {
            once.add(*element);
            twice.add(*element);
            twice.add(*element);
        }
        assert_eq!(once.into_vec(), twice.into_vec());
    }
}
