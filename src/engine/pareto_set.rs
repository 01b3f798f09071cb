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

use std::fmt::{Debug, Display};
use std::slice::Iter as SliceIter;

/// Decides how two elements of a `ParetoSet` compare.
///
/// `left_dominance_exist(left, right)` should return true when `left`
/// is strictly better than `right` on at least one criterion.
/// It is evaluated both ways when a candidate meets an element of the set :
///  - both true : the two elements are mutually non dominated, both are kept
///  - both false : the two elements are equivalent, the candidate is rejected
///  - only `left_dominance_exist(candidate, element)` : the element is dropped
///  - only `left_dominance_exist(element, candidate)` : the candidate is rejected
pub trait ParetoComparator<T> {
    fn left_dominance_exist(&self, left: &T, right: &T) -> bool;
}

impl<T, F> ParetoComparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn left_dominance_exist(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}

/// Notified of every change in a `ParetoSet`. Used for debugging.
pub trait ParetoSetEventListener<T> {
    fn accepted(&mut self, _new_element: &T) {}

    fn rejected(&mut self, _new_element: &T, _rejected_by: &T) {}

    fn dropped(&mut self, _element: &T, _dropped_by: &T) {}
}

/// Listener that does nothing, used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<T> ParetoSetEventListener<T> for NoopListener {}

/// An ordered collection that only keeps elements that are not dominated
/// by another element of the collection.
///
/// Elements that survive keep their insertion order, and a newly accepted
/// element is always appended at the end.
/// Elements cannot be removed, except by being dominated.
pub struct ParetoSet<T, C, L = NoopListener> {
    elements: Vec<T>,
    comparator: C,
    listener: L,
}

enum Insertion {
    Rejected { by: usize },
    Appended,
    // the candidate dominates the element at this position
    Dominating { first_dominated: usize },
}

impl<T, C> ParetoSet<T, C, NoopListener>
where
    C: ParetoComparator<T>,
{
    pub fn new(comparator: C) -> Self {
        Self::with_listener(comparator, NoopListener)
    }
}

impl<T, C, L> ParetoSet<T, C, L>
where
    C: ParetoComparator<T>,
    L: ParetoSetEventListener<T>,
{
    pub fn with_listener(comparator: C, listener: L) -> Self {
        Self {
            elements: Vec::new(),
            comparator,
            listener,
        }
    }

    /// Returns true if `candidate` would be accepted by `add()`,
    /// without modifying the set.
    pub fn qualify(&self, candidate: &T) -> bool {
        !matches!(self.find_insertion(candidate), Insertion::Rejected { .. })
    }

    /// Try to add `candidate` to the set.
    ///
    /// Returns true if the candidate was accepted, in which case all elements
    /// dominated by `candidate` are removed from the set.
    pub fn add(&mut self, candidate: T) -> bool {
        self.add_and_track_removals(candidate, |_| {})
    }

    // `on_removed` is called with the position (before removal) of each dropped element
    fn add_and_track_removals<F>(&mut self, candidate: T, mut on_removed: F) -> bool
    where
        F: FnMut(usize),
    {
        match self.find_insertion(&candidate) {
            Insertion::Rejected { by } => {
                self.listener.rejected(&candidate, &self.elements[by]);
                false
            }
            Insertion::Appended => {
                self.listener.accepted(&candidate);
                self.elements.push(candidate);
                true
            }
            Insertion::Dominating { first_dominated } => {
                self.remove_dominated_from(&candidate, first_dominated, &mut on_removed);
                self.listener.accepted(&candidate);
                self.elements.push(candidate);
                true
            }
        }
    }

    fn find_insertion(&self, candidate: &T) -> Insertion {
        for (idx, element) in self.elements.iter().enumerate() {
            let left_dominance = self.comparator.left_dominance_exist(candidate, element);
            let right_dominance = self.comparator.left_dominance_exist(element, candidate);
            match (left_dominance, right_dominance) {
                (true, true) => continue,
                (true, false) => {
                    return Insertion::Dominating {
                        first_dominated: idx,
                    }
                }
                (false, _) => return Insertion::Rejected { by: idx },
            }
        }
        Insertion::Appended
    }

    // the element at `first_dominated` is known to be dominated by `candidate`,
    // the elements after it still need to be checked
    fn remove_dominated_from<F>(
        &mut self,
        candidate: &T,
        first_dominated: usize,
        on_removed: &mut F,
    ) where
        F: FnMut(usize),
    {
        let comparator = &self.comparator;
        let listener = &mut self.listener;
        let mut position = 0;
        self.elements.retain(|element| {
            let current = position;
            position += 1;
            let is_dominated = current == first_dominated
                || (current > first_dominated
                    && comparator.left_dominance_exist(candidate, element)
                    && !comparator.left_dominance_exist(element, candidate));
            if is_dominated {
                listener.dropped(element, candidate);
                on_removed(current);
            }
            !is_dominated
        });
    }
}

impl<T, C, L> ParetoSet<T, C, L> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> SliceIter<'_, T> {
        self.elements.iter()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: Debug, C, L> Debug for ParetoSet<T, C, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

impl<T: Display, C, L> Display for ParetoSet<T, C, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (idx, element) in self.elements.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "}}")
    }
}

impl<'a, T, C, L> IntoIterator for &'a ParetoSet<T, C, L> {
    type Item = &'a T;
    type IntoIter = SliceIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// A `ParetoSet` that remembers a position in its elements, so that
/// the elements added after the last call to `mark_at_end()` can be listed.
///
/// The marker follows the elements : when an element before the marker
/// is dropped, the marker moves back by one.
pub struct ParetoSetWithMarker<T, C, L = NoopListener> {
    set: ParetoSet<T, C, L>,
    marker: usize,
}

impl<T, C> ParetoSetWithMarker<T, C, NoopListener>
where
    C: ParetoComparator<T>,
{
    pub fn new(comparator: C) -> Self {
        Self::with_listener(comparator, NoopListener)
    }
}

impl<T, C, L> ParetoSetWithMarker<T, C, L>
where
    C: ParetoComparator<T>,
    L: ParetoSetEventListener<T>,
{
    pub fn with_listener(comparator: C, listener: L) -> Self {
        Self {
            set: ParetoSet::with_listener(comparator, listener),
            marker: 0,
        }
    }

    pub fn add(&mut self, candidate: T) -> bool {
        let marker = &mut self.marker;
        let initial_marker = *marker;
        self.set.add_and_track_removals(candidate, |removed_position| {
            if removed_position < initial_marker {
                *marker -= 1;
            }
        })
    }

    pub fn qualify(&self, candidate: &T) -> bool {
        self.set.qualify(candidate)
    }

    /// Elements added after the marker will be the only ones
    /// listed by `iter_after_marker()`.
    pub fn mark_at_end(&mut self) {
        self.marker = self.set.len();
    }

    pub fn iter_after_marker(&self) -> SliceIter<'_, T> {
        self.set.elements[self.marker..].iter()
    }

    pub fn has_elements_after_marker(&self) -> bool {
        self.marker < self.set.len()
    }

    pub fn clear(&mut self) {
        self.set.clear();
        self.marker = 0;
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> SliceIter<'_, T> {
        self.set.iter()
    }

    pub fn listener_mut(&mut self) -> &mut L {
        self.set.listener_mut()
    }
}

impl<T: Display, C, L> Display for ParetoSetWithMarker<T, C, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.set)
    }
}

/// Keeps the elements of `elements` that are pareto optimal.
///
/// If less than `min_limit` elements are pareto optimal, the set is
/// completed with the dominated elements that were inserted first.
/// The returned elements keep the order they have in `elements`.
pub fn filter_with_min_limit<T, C>(elements: Vec<T>, comparator: &C, min_limit: usize) -> Vec<T>
where
    C: ParetoComparator<T>,
{
    let optimal_positions: Vec<usize> = {
        let indexed_comparator = |left: &usize, right: &usize| {
            comparator.left_dominance_exist(&elements[*left], &elements[*right])
        };
        let mut set = ParetoSet::new(indexed_comparator);
        for position in 0..elements.len() {
            set.add(position);
        }
        set.into_vec()
    };

    let mut keep = vec![false; elements.len()];
    for position in optimal_positions.iter() {
        keep[*position] = true;
    }
    let mut nb_to_add_back = min_limit.saturating_sub(optimal_positions.len());
    for flag in keep.iter_mut() {
        if nb_to_add_back == 0 {
            break;
        }
        if !*flag {
            *flag = true;
            nb_to_add_back -= 1;
        }
    }

    elements
        .into_iter()
        .zip(keep.into_iter())
        .filter_map(|(element, keep)| if keep { Some(element) } else { None })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Vector {
        name: &'static str,
        values: Vec<i32>,
    }

    fn vector(name: &'static str, values: &[i32]) -> Vector {
        Vector {
            name,
            values: values.to_vec(),
        }
    }

    fn v(values: &[i32]) -> Vector {
        vector("Test", values)
    }

    impl Display for Vector {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}{:?}", self.name, self.values)
        }
    }

    fn less_less(l: &Vector, r: &Vector) -> bool {
        l.values[0] < r.values[0] || l.values[1] < r.values[1]
    }

    fn less_different(l: &Vector, r: &Vector) -> bool {
        l.values[0] < r.values[0] || l.values[1] != r.values[1]
    }

    fn add_checked<C: ParetoComparator<Vector>, L: ParetoSetEventListener<Vector>>(
        set: &mut ParetoSet<Vector, C, L>,
        vector: Vector,
    ) -> bool {
        let qualify = set.qualify(&vector);
        let added = set.add(vector);
        assert_eq!(qualify, added, "qualify() and add() should agree");
        added
    }

    fn names<C, L>(set: &ParetoSet<Vector, C, L>) -> String {
        set.iter().map(|v| v.name).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn empty_set_accepts_anything() {
        let mut set = ParetoSet::new(|l: &Vector, r: &Vector| l.values[0] < r.values[0]);
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "{}");
        assert!(add_checked(&mut set, vector("V0", &[5, 5, 5])));
        assert_eq!(set.to_string(), "{V0[5, 5, 5]}");
        assert_eq!(set.get(0), Some(&vector("V0", &[5, 5, 5])));
    }

    #[test]
    fn less_than() {
        let mut set = ParetoSet::new(|l: &Vector, r: &Vector| l.values[0] < r.values[0]);
        set.add(vector("V0", &[5]));
        assert!(!add_checked(&mut set, vector("Not", &[5])));
        assert!(!add_checked(&mut set, vector("Not", &[6])));
        assert_eq!(set.to_string(), "{V0[5]}");
        assert!(add_checked(&mut set, vector("V1", &[4])));
        assert_eq!(set.to_string(), "{V1[4]}");
    }

    #[test]
    fn different() {
        let mut set = ParetoSet::new(|l: &Vector, r: &Vector| l.values[0] != r.values[0]);
        set.add(vector("V0", &[5]));
        assert!(!add_checked(&mut set, vector("Not", &[5])));
        assert!(add_checked(&mut set, vector("D1", &[6])));
        assert!(add_checked(&mut set, vector("D2", &[3])));
        assert!(add_checked(&mut set, vector("D3", &[4])));
        assert_eq!(set.to_string(), "{V0[5], D1[6], D2[3], D3[4]}");
    }

    #[rstest]
    // rejected
    #[case(&[6, 5], "V0")]
    #[case(&[5, 6], "V0")]
    #[case(&[5, 5], "V0")]
    // replaces
    #[case(&[4, 5], "Test")]
    #[case(&[5, 4], "Test")]
    // both kept
    #[case(&[4, 6], "V0 Test")]
    #[case(&[6, 4], "V0 Test")]
    fn two_criteria_less_than(#[case] values: &[i32], #[case] expected: &str) {
        let mut set = ParetoSet::new(less_less);
        set.add(vector("V0", &[5, 5]));
        add_checked(&mut set, v(values));
        assert_eq!(names(&set), expected);
    }

    #[rstest]
    #[case(&[6, 5], "V0")]
    #[case(&[5, 5], "V0")]
    #[case(&[4, 5], "Test")]
    #[case(&[1, 7], "V0 Test")]
    #[case(&[5, 7], "V0 Test")]
    #[case(&[9, 7], "V0 Test")]
    fn two_criteria_less_than_and_different(#[case] values: &[i32], #[case] expected: &str) {
        let mut set = ParetoSet::new(less_different);
        set.add(vector("V0", &[5, 5]));
        add_checked(&mut set, v(values));
        assert_eq!(names(&set), expected);
    }

    #[rstest]
    #[case(&[6, 6], "V0")]
    #[case(&[5, 7], "V0")]
    #[case(&[5, 6], "V0")]
    #[case(&[4, 8], "V0 Test")]
    #[case(&[6, 5], "V0 Test")]
    #[case(&[5, 5], "V0 Test")]
    #[case(&[4, 4], "Test")]
    #[case(&[5, 4], "Test")]
    fn two_criteria_with_a_relaxed_criterion(#[case] values: &[i32], #[case] expected: &str) {
        let mut set = ParetoSet::new(|l: &Vector, r: &Vector| {
            l.values[0] < r.values[0] || l.values[1] < r.values[1] + 1
        });
        set.add(vector("V0", &[5, 5]));
        add_checked(&mut set, v(values));
        assert_eq!(names(&set), expected);
    }

    #[rstest]
    #[case(&[5, 5, 5, 7], "V0")]
    #[case(&[6, 5, 5, 7], "V0")]
    #[case(&[5, 5, 4, 7], "V0")]
    #[case(&[4, 5, 5, 3], "Test")]
    #[case(&[5, 5, 6, 3], "Test")]
    #[case(&[5, 5, 5, 3], "Test")]
    #[case(&[5, 4, 5, 6], "V0 Test")]
    #[case(&[9, 6, 1, 9], "V0 Test")]
    #[case(&[1, 4, 9, 1], "V0 Test")]
    #[case(&[4, 5, 4, 7], "V0 Test")]
    #[case(&[6, 5, 6, 7], "V0 Test")]
    #[case(&[6, 5, 5, 2], "V0 Test")]
    #[case(&[6, 5, 4, 2], "V0 Test")]
    fn four_criteria(#[case] values: &[i32], #[case] expected: &str) {
        let mut set = ParetoSet::new(|l: &Vector, r: &Vector| {
            l.values[0] < r.values[0]
                || l.values[1] != r.values[1]
                || l.values[2] > r.values[2]
                || l.values[3] < r.values[3] + 2
        });
        set.add(vector("V0", &[5, 5, 5, 5]));
        add_checked(&mut set, v(values));
        assert_eq!(names(&set), expected);
    }

    #[test]
    fn one_vector_dominates_many() {
        let mut set = ParetoSet::new(less_less);
        set.add(vector("V0", &[5, 1]));
        set.add(vector("V1", &[3, 3]));
        set.add(vector("V2", &[0, 7]));
        set.add(vector("V3", &[1, 5]));
        assert_eq!(set.to_string(), "{V0[5, 1], V1[3, 3], V2[0, 7], V3[1, 5]}");

        set.add(vector("V", &[1, 1]));
        assert_eq!(set.to_string(), "{V2[0, 7], V[1, 1]}");

        set.add(vector("X", &[0, 1]));
        assert_eq!(set.to_string(), "{X[0, 1]}");
    }

    #[test]
    fn relaxed_criterion_keeps_the_two_smallest_values() {
        let mut set = ParetoSet::new(|l: &Vector, r: &Vector| {
            l.values[0] < r.values[0] || l.values[1] < r.values[1] + 2
        });
        let values = [
            [5, 5],
            [4, 4],
            [5, 4],
            [5, 3],
            [5, 2],
            [5, 1],
            [5, 2],
            [5, 3],
            [5, 4],
            [5, 5],
        ];
        let names = ["V0", "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9"];
        for (name, value) in names.iter().zip(values.iter()) {
            add_checked(&mut set, vector(*name, value));
        }
        assert_eq!(set.to_string(), "{V1[4, 4], V4[5, 2], V5[5, 1], V6[5, 2]}");
    }

    #[test]
    fn relaxed_criterion_accepts_ten_percent_extra() {
        let mut set = ParetoSet::new(|l: &Vector, r: &Vector| {
            l.values[0] < r.values[0]
                || f64::from(l.values[1]) <= (f64::from(r.values[1]) * 1.1).round()
        });
        add_checked(&mut set, vector("a", &[1, 110]));
        add_checked(&mut set, vector("a", &[1, 111]));
        add_checked(&mut set, vector("d", &[1, 100]));
        add_checked(&mut set, vector("g", &[1, 111]));
        add_checked(&mut set, vector("g", &[1, 110]));
        assert_eq!(set.to_string(), "{a[1, 110], d[1, 100], g[1, 110]}");
    }

    #[test]
    fn many_mutually_optimal_elements() {
        let mut set = ParetoSet::new(less_less);
        for i in 1..=100 {
            set.add(v(&[i, 101 - i]));
            assert_eq!(set.len(), i as usize);
        }
        set.add(v(&[0, 0]));
        assert_eq!(set.to_string(), "{Test[0, 0]}");
    }

    #[rstest]
    #[case(&[("v25", [2, 5]), ("v35", [3, 5])], "v25")]
    #[case(&[("v53", [5, 3]), ("v25", [2, 5]), ("v35", [3, 5])], "v53 v25")]
    #[case(&[("v53", [5, 3]), ("v25", [2, 5]), ("v44", [4, 4])], "v53 v25 v44")]
    #[case(&[("v53", [5, 3]), ("v25", [2, 5]), ("v44", [4, 4]), ("v22", [2, 2])], "v22")]
    #[case(&[("v53", [5, 3]), ("v35", [3, 5]), ("v53", [5, 3]), ("v35", [3, 5])], "v53 v35")]
    #[case(&[("v55", [5, 5]), ("v55", [5, 5])], "v55")]
    #[case(&[("v35", [3, 5]), ("v53", [5, 3]), ("v25", [2, 5])], "v53 v25")]
    fn adding_multiple_elements(
        #[case] to_add: &[(&'static str, [i32; 2])],
        #[case] expected: &str,
    ) {
        let mut set = ParetoSet::new(less_less);
        for (name, values) in to_add {
            add_checked(&mut set, vector(*name, values));
        }
        assert_eq!(names(&set), expected);
    }

    #[derive(Default)]
    struct DroppedRecorder {
        dropped: Vec<String>,
    }

    impl ParetoSetEventListener<Vector> for DroppedRecorder {
        fn dropped(&mut self, element: &Vector, _dropped_by: &Vector) {
            self.dropped.push(element.to_string());
        }
    }

    #[test]
    fn dropped_elements_are_notified() {
        let mut set = ParetoSet::with_listener(less_less, DroppedRecorder::default());
        set.add(v(&[1, 7]));
        set.add(v(&[2, 6]));
        assert!(set.listener().dropped.is_empty());

        let mut set = ParetoSet::with_listener(less_less, DroppedRecorder::default());
        set.add(v(&[7, 3]));
        set.add(v(&[5, 5]));
        assert!(set.listener().dropped.is_empty());
        set.add(v(&[6, 3]));
        assert_eq!(set.listener().dropped, vec!["Test[7, 3]".to_string()]);

        let mut set = ParetoSet::with_listener(less_less, DroppedRecorder::default());
        set.add(v(&[5, 5]));
        set.add(v(&[7, 3]));
        set.add(v(&[6, 3]));
        assert_eq!(set.listener().dropped, vec!["Test[7, 3]".to_string()]);
    }

    #[test]
    fn marker_follows_dropped_elements() {
        let mut set = ParetoSetWithMarker::new(less_less);
        set.add(vector("A", &[5, 1]));
        set.add(vector("B", &[3, 3]));
        set.add(vector("C", &[1, 5]));
        set.mark_at_end();
        assert!(!set.has_elements_after_marker());

        // dominates B, which is before the marker
        set.add(vector("D", &[2, 2]));
        let after_marker: Vec<_> = set.iter_after_marker().map(|v| v.name).collect();
        assert_eq!(after_marker, vec!["D"]);

        set.add(vector("E", &[0, 9]));
        let after_marker: Vec<_> = set.iter_after_marker().map(|v| v.name).collect();
        assert_eq!(after_marker, vec!["D", "E"]);
        assert_eq!(set.len(), 4);

        set.clear();
        assert!(set.is_empty());
        assert!(!set.has_elements_after_marker());
    }

    #[test]
    fn min_limit_keeps_earliest_inserted_elements() {
        let elements = vec![
            vector("A", &[5, 5]),
            vector("B", &[6, 6]),
            vector("C", &[4, 4]),
            vector("D", &[7, 7]),
        ];
        let comparator = less_less;

        let filtered = filter_with_min_limit(elements.clone(), &comparator, 0);
        let names: Vec<_> = filtered.iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["C"]);

        let filtered = filter_with_min_limit(elements.clone(), &comparator, 2);
        let names: Vec<_> = filtered.iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["A", "C"]);

        let filtered = filter_with_min_limit(elements, &comparator, 10);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn min_limit_with_three_criteria() {
        // (c1, transfers, c2), the lower the better
        let itineraries: Vec<(i32, u8, u32)> =
            vec![(100, 2, 3), (90, 2, 3), (80, 1, 1), (85, 1, 1)];
        let comparator = |left: &(i32, u8, u32), right: &(i32, u8, u32)| {
            left.0 < right.0 || left.1 < right.1 || left.2 < right.2
        };

        let filtered = filter_with_min_limit(itineraries.clone(), &comparator, 0);
        assert_eq!(filtered, vec![(80, 1, 1)]);

        let filtered = filter_with_min_limit(itineraries, &comparator, 2);
        assert_eq!(filtered, vec![(100, 2, 3), (80, 1, 1)]);
    }
}
