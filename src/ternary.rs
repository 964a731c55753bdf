/// A conditional expression on one line.  `rustfmt` spreads a plain
/// `if` over five, and the border rules for energy and seam finding
/// read far better as a table of `cq!` calls.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
