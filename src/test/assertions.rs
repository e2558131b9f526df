/// Asserts that two floating-point values are approximately equal.
///
/// The default tolerance is the machine epsilon of the value type. Pass `tol = ...` for
/// values that went through rounding or longer computations.
///
/// ```rust
/// # use linearize::assert_close;
/// assert_close!(0.1 + 0.2, 0.3);
/// assert_close!(1.0004, 1.0, tol = 1e-3);
/// assert_close!(2.0_f32.sqrt() * 2.0_f32.sqrt(), 2.0, tol = 1e-6, "sqrt of {}", 2);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $msg:literal $(, $args:expr)*)?) => { #[allow(clippy::float_cmp)] {
        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($msg $(, $args)*); )?

        let (a, b, tol) = ($a, $b, $tol);
        assert!(
            a == b || $crate::value::Value::abs(a - b) <= tol,
            "{msg}: {a} != {b} (tolerance {tol})"
        );
    }};

    ($a:expr, $b:expr $(, $msg:literal $(, $args:expr)*)?) => { #[allow(clippy::float_cmp)] {
        fn epsilon<T: $crate::value::Value>(_: T) -> T {
            T::epsilon()
        }

        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($msg $(, $args)*); )?

        let (a, b) = ($a, $b);
        assert!(
            a == b || $crate::value::Value::abs(a - b) <= epsilon(a),
            "{msg}: {a} != {b}"
        );
    }};
}

/// Asserts that two sequences of floating-point values are approximately equal element-wise.
///
/// Accepts the same optional `tol = ...` as [`crate::assert_close`].
///
/// ```rust
/// # use linearize::assert_all_close;
/// assert_all_close!([1.0, 2.0], vec![1.0, 2.0]);
/// assert_all_close!([1.0, 2.0], [1.0001, 1.9999], tol = 1e-3);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr, tol = $tol:expr $(, $msg:literal $(, $args:expr)*)?) => {{
        let (src, dst) = (&$src, &$dst);

        #[allow(unused_assignments, unused_mut)]
        let mut msg = format!("{} elements", src.len());
        $(
            msg = format!($msg $(, $args)*);
        )?

        assert_eq!(src.len(), dst.len(), "{msg} - length mismatch");

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, tol = $tol, "{msg} - src[{i}]");
        }
    }};

    ($src:expr, $dst:expr $(, $msg:literal $(, $args:expr)*)?) => {{
        let (src, dst) = (&$src, &$dst);

        #[allow(unused_assignments, unused_mut)]
        let mut msg = format!("{} elements", src.len());
        $(
            msg = format!($msg $(, $args)*);
        )?

        assert_eq!(src.len(), dst.len(), "{msg} - length mismatch");

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, "{msg} - src[{i}]");
        }
    }};
}

/// Asserts that one linearization step selects the expected transform.
///
/// If the assertion fails, the score of every catalog transform is included in the
/// panic message.
///
/// Optionally takes a maximum score the winner must meet.
///
/// ```rust
/// # use linearize::{assert_linearizes, transforms::Transform};
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [3.0, 5.0, 7.0, 9.0];
/// assert_linearizes!(&x, &y, Transform::Identity, max_score = 1e-9);
/// ```
#[macro_export]
macro_rules! assert_linearizes {
    ($x:expr, $y:expr, $expected:expr $(, max_score = $max:expr)?) => {{
        #[allow(unused)] use std::fmt::Write;

        let (x, y) = ($x, $y);
        let expected: $crate::transforms::Transform = $expected;

        let board = match $crate::evaluate_catalog(x, y) {
            Ok(board) => board,
            Err(e) => panic!("Linearization step failed: {e}"),
        };
        let Some(step) = $crate::select_best(&board) else {
            panic!("Linearization step produced no candidates");
        };

        let mut failure = None;
        if step.transform != expected {
            failure = Some(format!("Expected `{expected}` but `{}` was selected", step.transform));
        }
        $(
            if failure.is_none() && step.score > $max {
                failure = Some(format!("`{expected}` scored {} > {}", step.score, $max));
            }
        )?

        if let Some(mut msg) = failure {
            write!(msg, "\n{}", $crate::display::Scoreboard::new(&board)).ok();
            panic!("{msg}");
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::transforms::Transform;

    #[test]
    fn close_within_tolerance() {
        assert_close!(1.0, 1.0 + f64::EPSILON);
        assert_close!(10.0_f32, 10.004, tol = 0.01);
        assert_all_close!(vec![0.5, 0.25], [0.5, 0.25]);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn close_rejects_distant_values() {
        assert_close!(1.0, 1.1);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn all_close_rejects_length_mismatch() {
        assert_all_close!([1.0, 2.0], [1.0]);
    }

    #[test]
    fn linearizes_cubic_growth() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y: Vec<f64> = x.iter().map(|v: &f64| (2.0 * v + 1.0).cbrt()).collect();
        assert_linearizes!(&x, &y, Transform::Cube);
    }

    #[test]
    #[should_panic(expected = "was selected")]
    fn linearizes_reports_wrong_pick() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 4.0, 9.0, 16.0, 25.0];
        assert_linearizes!(&x, &y, Transform::Log);
    }
}
