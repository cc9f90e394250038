//! Precomputed study results: the report images shown on the Charts tab and
//! the statistics shown on the Analysis tab. Nothing here is recomputed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportImage {
    /// File name inside the static directory.
    pub file: &'static str,
    pub caption: &'static str,
    pub kind: &'static str,
    /// Reading of the chart, shown under it.
    pub interpretation: &'static str,
}

impl ReportImage {
    /// URL path under `/static`, with spaces percent-encoded.
    pub fn url(&self) -> String {
        format!("/static/{}", self.file.replace(' ', "%20"))
    }
}

pub const REPORT_IMAGES: [ReportImage; 4] = [
    ReportImage {
        file: "Time Series Plot of Gold and SP500 Price.png",
        caption: "Gold Price vs SP500 Price",
        kind: "line",
        interpretation: "The line graph shows the price trends of Gold and the S&P 500 from around \
            2001 to 2019. During the financial crisis around 2008 the two diverge: gold rose as the \
            S&P 500 fell sharply, supporting its status as a safe-haven asset during market downturns. \
            After 2009, as the S&P 500 recovers and grows, gold initially declines, a shift back to \
            riskier assets as conditions improve. Both show strong upward trends after 2015, possibly \
            reflecting broad factors such as monetary policy or global economic conditions.",
    },
    ReportImage {
        file: "scatterplotsp500vs10.png",
        caption: "SP500 Price vs 10 Year Treasury Note",
        kind: "scatter",
        interpretation: "The S&P 500 Price against the 10-Year Treasury Note Yield forms distinct \
            clusters for different economic conditions. No linear relationship holds across the whole \
            dataset. Within some clusters higher stock prices coincide with moderately rising yields, \
            likely periods of growth where investors favour equities over bonds; other clusters pair \
            lower stock prices with higher yields, potentially economic downturns.",
    },
    ReportImage {
        file: "scatterplotsp500vsg.png",
        caption: "SP500 Price vs Gold Price",
        kind: "scatter",
        interpretation: "The S&P 500 Price against the Gold Price shows no straightforward linear \
            correlation. One cluster has both prices low, possibly times of stability or low inflation \
            expectations. Another sits at high gold prices across moderate S&P 500 levels, which may \
            mark periods when investors turn to gold as a safe haven amid uncertainty or volatility.",
    },
    ReportImage {
        file: "scatterplotgvs10.png",
        caption: "Gold Price vs 10 Year T Note",
        kind: "scatter",
        interpretation: "Gold Price against the 10-Year Treasury Note Yield shows an inverse \
            relationship. Lower gold prices with higher yields typically indicate strong growth and \
            reduced demand for gold as a safe haven; higher gold prices with lower yields suggest \
            uncertainty, when gold is favoured and yields on safer assets fall. Transition areas \
            between the clusters reflect shifts in sentiment or policy.",
    },
];

/// One named test result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistic {
    pub label: &'static str,
    pub value: f64,
}

const fn stat(label: &'static str, value: f64) -> Statistic {
    Statistic { label, value }
}

/// Shapiro-Wilk p-values of each price/yield series.
pub const NORMALITY_P_VALUES: [Statistic; 3] = [
    stat("Gold Price", 1.8130817924030501e-44),
    stat("SP500 Price", 5.0869134941937023e-51),
    stat("10 Year T Note Yield", 5.148480265824883e-39),
];

pub const SPEARMAN: [Statistic; 3] = [
    stat("Gold Price - SP500 Price", 0.5957593873649222),
    stat("Gold Price - 10 Year T Note Yield", -0.8320977905265164),
    stat("SP500 Price - 10 Year T Note Yield", -0.5516454320480819),
];

pub const KENDALL: [Statistic; 3] = [
    stat("Gold Price - SP500 Price", 0.4101357525652475),
    stat("Gold Price - 10 Year T Note Yield", -0.6044831658236524),
    stat("SP500 Price - 10 Year T Note Yield", -0.3289082028262134),
];

pub const SIGNIFICANCE: f64 = 0.05;

/// Johansen cointegration test over the three series, one row per rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JohansenResult {
    pub eigenvalues: [f64; 3],
    pub trace: [f64; 3],
    /// Critical values at 90%, 95% and 99%.
    pub critical: [[f64; 3]; 3],
}

impl JohansenResult {
    /// Ranks whose trace statistic exceeds the 90% critical value.
    pub fn cointegrating_ranks(&self) -> usize {
        self.trace
            .iter()
            .zip(&self.critical)
            .take_while(|(trace, crit)| **trace > crit[0])
            .count()
    }
}

pub const JOHANSEN: JohansenResult = JohansenResult {
    eigenvalues: [3.49608761e-03, 1.11129871e-03, 2.82452942e-05],
    trace: [22.12091955, 5.43287361, 0.13459073],
    critical: [
        [27.0669, 29.7961, 35.4628],
        [13.4294, 15.4943, 19.9349],
        [2.7055, 3.8415, 6.6349],
    ],
};
