use crate::select::Selector;

macro_rules! IndexStruct {
    ($name:ident = $index:expr $(, $names:ident = $indices:expr)*) => (
        /// This type is used to 'index' into a tuple of generics.
        /// See [`Select`](crate::Select) for what it selects.
        #[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Clone, Copy)]
        pub struct $name;

        impl Selector for $name {
            const INDEX: usize = $index;
        }

        IndexStruct!($($names = $indices),*);
    );

    () => ();
}

IndexStruct!(I0 = 0, I1 = 1, I2 = 2, I3 = 3, I4 = 4, I5 = 5, I6 = 6, I7 = 7, I8 = 8, I9 = 9);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_count_from_zero() {
        assert_eq!(I0::INDEX, 0);
        assert_eq!(I4::INDEX, 4);
        assert_eq!(I9::INDEX, 9);
    }
}
