macro_rules! assert_miette_contains {
    ($diag:expr, $needle:expr) => {{
        use miette::{GraphicalReportHandler, GraphicalTheme};

        let mut out = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .with_width(100)
            .render_report(&mut out, &$diag.unwrap_err())
            .unwrap();
        assert!(
            out.contains($needle),
            "{} rendered without {:?}:\n{out}",
            stringify!($diag),
            $needle
        );
    }};
}

pub(crate) use assert_miette_contains;
