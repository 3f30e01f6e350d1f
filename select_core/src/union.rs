use std::mem::ManuallyDrop;

use crate::index::*;
use crate::select::{drop_as, id_of, name_of, Contains, Select, TypeIds, TypeUnion};

macro_rules! doc_comment {
    ($x:expr, $($tt:tt)*) => {
        #[doc = $x]
        $($tt)*
    };
}

macro_rules! impl_select {
    (
        NAMES = [$name:ident $(,$names:ident)*],
        GENERICS = [$current:ident $(,$generics:ident)*],
        COPIES = [$($copies:ident),*]
    ) => (
        unsafe impl<$($copies),*> Select<$name> for ($($copies,)*) {
            type Output = $current;
        }

        impl<$($copies),*> Contains<$current, $name> for ($($copies,)*) {}

        impl_select!(
            NAMES = [$($names),*],
            GENERICS = [$($generics),*],
            COPIES = [$($copies),*]
        );
    );

    (
        NAMES = [],
        GENERICS = [],
        COPIES = [$($copies:ident),*]
    ) => ();
}

macro_rules! Union {
    ($name:ident = $count:literal {
        $($fieldname:ident: $generic:ident => $selector:ident),*
    }) => (
        doc_comment!(
            concat!("This union can hold the following Generics: ", stringify!($($generic),*)),
            #[repr(C)]
            #[allow(dead_code)]
            pub union $name<$($generic),*> {
                $($fieldname: ManuallyDrop<$generic>,)*
            }
        );

        unsafe impl<$($generic),*> TypeUnion for ($($generic,)*) {
            type Union = $name<$($generic),*>;

            const COUNT: usize = $count;

            #[inline]
            unsafe fn drop_at(which: usize, union: *mut Self::Union) {
                let thunks: [unsafe fn(*mut Self::Union); $count] = [
                    $(drop_as::<Self::Union, $generic>),*
                ];
                thunks[which](union)
            }

            #[inline]
            fn type_name(which: usize) -> Option<&'static str> {
                [$(name_of::<$generic>()),*].get(which).copied()
            }
        }

        impl<$($generic: 'static),*> TypeIds for ($($generic,)*) {
            fn position<T: 'static>() -> Option<usize> {
                let id = id_of::<T>();
                [$(id_of::<$generic>()),*].iter().position(|other| *other == id)
            }
        }

        impl_select!(
            NAMES = [$($selector),*],
            GENERICS = [$($generic),*],
            COPIES = [$($generic),*]
        );
    )
}

Union!(Union2 = 2 { a: A => I0, b: B => I1 });
Union!(Union3 = 3 { a: A => I0, b: B => I1, c: C => I2 });
Union!(Union4 = 4 { a: A => I0, b: B => I1, c: C => I2, d: D => I3 });
Union!(Union5 = 5 { a: A => I0, b: B => I1, c: C => I2, d: D => I3, e: E => I4 });
Union!(Union6 = 6 { a: A => I0, b: B => I1, c: C => I2, d: D => I3, e: E => I4, f: F => I5 });
Union!(Union7 = 7 { a: A => I0, b: B => I1, c: C => I2, d: D => I3, e: E => I4, f: F => I5, g: G => I6 });
Union!(Union8 = 8 { a: A => I0, b: B => I1, c: C => I2, d: D => I3, e: E => I4, f: F => I5, g: G => I6, h: H => I7 });
Union!(Union9 = 9 { a: A => I0, b: B => I1, c: C => I2, d: D => I3, e: E => I4, f: F => I5, g: G => I6, h: H => I7, i: I => I8 });
Union!(Union10 = 10 { a: A => I0, b: B => I1, c: C => I2, d: D => I3, e: E => I4, f: F => I5, g: G => I6, h: H => I7, i: I => I8, j: J => I9 });

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, size_of};

    #[test]
    fn union_fits_largest_and_most_aligned() {
        type L = (u8, [u64; 3], u16);

        assert!(size_of::<<L as TypeUnion>::Union>() >= size_of::<[u64; 3]>());
        assert_eq!(align_of::<<L as TypeUnion>::Union>(), align_of::<u64>());
        assert_eq!(<L as TypeUnion>::COUNT, 3);
    }

    #[test]
    fn type_names_by_position() {
        type L = (u32, String);

        assert_eq!(L::type_name(0), Some("u32"));
        assert!(L::type_name(1).map_or(false, |name| name.ends_with("String")));
        assert_eq!(L::type_name(2), None);
    }

    #[test]
    fn position_of_types() {
        type L = (u32, String, Vec<u8>);

        assert_eq!(L::position::<Vec<u8>>(), Some(2));
        assert!(L::contains::<u32>());
        assert!(!L::contains::<i64>());
    }

    #[test]
    fn drop_at_runs_the_destructor() {
        use std::mem::MaybeUninit;
        use std::rc::Rc;

        type L = (u8, Rc<()>);

        let counter = Rc::new(());
        let mut storage = MaybeUninit::<<L as TypeUnion>::Union>::uninit();
        unsafe {
            storage.as_mut_ptr().cast::<Rc<()>>().write(Rc::clone(&counter));
            assert_eq!(Rc::strong_count(&counter), 2);
            L::drop_at(1, storage.as_mut_ptr());
        }
        assert_eq!(Rc::strong_count(&counter), 1);
    }

    fn selected<L: Contains<T, S>, T, S: crate::Selector>() -> usize {
        S::INDEX
    }

    #[test]
    fn position_is_inferred_from_the_type() {
        assert_eq!(selected::<(u32, String), String, _>(), 1);
        assert_eq!(selected::<(u32, String, bool), u32, _>(), 0);
    }
}
