//! Subtree conflict resolution between a freshly placed child and the forest to its left.

use super::Walker;

impl Walker {
    fn next_left(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.first().copied().or(self.nodes[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.nodes[v].children.last().copied().or(self.nodes[v].thread)
    }

    /// Offset a contour walk accumulates when stepping below `v`.
    fn contour_offset(&self, v: usize) -> f64 {
        if self.nodes[v].is_leaf() {
            self.nodes[v].thread_offset
        } else {
            self.nodes[v].modifier
        }
    }

    /// Walks the right contour of the forest left of `v` against the left contour of `v`'s
    /// subtree one level at a time and shifts `v` right wherever they come closer than the
    /// required distance. Returns the updated default ancestor.
    ///
    /// Naming follows the usual convention: `i`/`o` for inside/outside contour, `p`/`m` for the
    /// right (plus) and left (minus) side of the gap.
    pub(super) fn apportion(&mut self, v: usize, default_ancestor: usize) -> usize {
        let Some(w) = self.nodes[v].left_sibling else {
            return default_ancestor;
        };
        let Some(parent) = self.nodes[v].parent else {
            return default_ancestor;
        };
        let mut default_ancestor = default_ancestor;

        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.nodes[parent].children[0];
        let mut sip = self.contour_offset(vip);
        let mut sop = self.contour_offset(vop);
        let mut sim = self.contour_offset(vim);
        let mut som = self.contour_offset(vom);

        while let (Some(nim), Some(nip), Some(nom), Some(nop)) = (
            self.next_right(vim),
            self.next_left(vip),
            self.next_left(vom),
            self.next_right(vop),
        ) {
            vim = nim;
            vip = nip;
            vom = nom;
            vop = nop;
            self.nodes[vop].ancestor = v;

            let gap = (self.nodes[vim].prelim + sim) - (self.nodes[vip].prelim + sip);
            let shift = gap + self.distance(vim, vip);
            if shift > 0.0 {
                let wl = self.ancestor_of(vim, v, default_ancestor);
                self.move_subtree(wl, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.contour_offset(vim);
            sip += self.contour_offset(vip);
            som += self.contour_offset(vom);
            sop += self.contour_offset(vop);
        }

        if let Some(next) = self.next_right(vim) {
            if self.next_right(vop).is_none() {
                self.nodes[vop].thread = Some(next);
                self.nodes[vop].thread_offset += sim - sop;
            }
        }
        if let Some(next) = self.next_left(vip) {
            if self.next_left(vom).is_none() {
                self.nodes[vom].thread = Some(next);
                self.nodes[vom].thread_offset += sip - som;
                default_ancestor = v;
            }
        }

        default_ancestor
    }

    /// The sibling of `v` whose subtree contains `vim`, falling back to the default ancestor.
    fn ancestor_of(&self, vim: usize, v: usize, default_ancestor: usize) -> usize {
        let candidate = self.nodes[vim].ancestor;
        if self.nodes[candidate].parent == self.nodes[v].parent {
            candidate
        } else {
            default_ancestor
        }
    }

    /// Moves subtree `wr` right by `shift` and records how the intermediate siblings between
    /// `wl` and `wr` share it. The intermediate moves are applied later by `execute_shifts`.
    fn move_subtree(&mut self, wl: usize, wr: usize, shift: f64) {
        let subtrees = self.nodes[wr]
            .number
            .saturating_sub(self.nodes[wl].number)
            .max(1) as f64;
        self.nodes[wr].change -= shift / subtrees;
        self.nodes[wr].shift += shift;
        self.nodes[wl].change += shift / subtrees;
        self.translate_subtree(wr, shift);
    }

    fn translate_subtree(&mut self, w: usize, shift: f64) {
        self.nodes[w].prelim += shift;
        if !self.nodes[w].is_leaf() {
            self.nodes[w].modifier += shift;
        }
    }

    /// Applies the shifts recorded by `move_subtree` to all children of `v` in one right-to-left
    /// pass.
    pub(super) fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for i in (0..self.nodes[v].children.len()).rev() {
            let w = self.nodes[v].children[i];
            self.translate_subtree(w, shift);
            change += self.nodes[w].change;
            shift += self.nodes[w].shift + change;
        }
    }
}
