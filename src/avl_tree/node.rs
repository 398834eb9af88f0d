use crate::bst;

/// A node of an avl tree. The auxiliary payload is the balance factor, which is
/// `height(right) - height(left)`.
pub type Node<T, U> = bst::Node<T, U, i8>;

pub type Tree<T, U> = bst::BinarySearchTree<T, U, i8>;

impl<T, U> Node<T, U> {
    pub fn balance(&self) -> i8 {
        self.aux
    }

    pub fn set_balance(&mut self, balance: i8) {
        debug_assert!(balance.abs() <= 2);
        self.aux = balance;
    }

    /// Adds `diff` to the balance factor and returns the new balance factor.
    pub fn update_balance(&mut self, diff: i8) -> i8 {
        self.set_balance(self.aux + diff);
        self.aux
    }
}
