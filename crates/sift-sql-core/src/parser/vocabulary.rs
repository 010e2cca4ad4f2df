//! Name vocabularies for function-call classification.
//!
//! Function names are not reserved words; a bare identifier followed by
//! `(` is classified here by its upper-cased spelling. Lookups run in the
//! order the shapes are declared, so a name listed in two families
//! resolves to the first.

use crate::ast::{
    AggregateName, PercentileName, RankingFunction, ScalarCategory, TimestampFunction,
};

const MATHEMATICAL: &[&str] = &[
    "ABS", "CBRT", "CEIL", "CEILING", "CONV", "CRC32", "E", "EXP", "EXPM1", "FLOOR", "LN", "LOG",
    "LOG10", "LOG2", "MOD", "PI", "POW", "POWER", "RAND", "RINT", "ROUND", "SIGN", "SIGNUM",
    "SQRT", "TRUNCATE",
];

const TRIGONOMETRIC: &[&str] = &[
    "ACOS", "ASIN", "ATAN", "ATAN2", "COS", "COSH", "COT", "DEGREES", "RADIANS", "SIN", "SINH",
    "TAN",
];

const ARITHMETIC: &[&str] = &["ADD", "SUBTRACT", "MULTIPLY", "DIVIDE", "MOD", "MODULUS"];

const DATE_TIME: &[&str] = &[
    "ADDDATE",
    "ADDTIME",
    "CONVERT_TZ",
    "CURDATE",
    "CURTIME",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "DATE",
    "DATE_ADD",
    "DATE_FORMAT",
    "DATE_SUB",
    "DATEDIFF",
    "DATETIME",
    "DAY",
    "DAYNAME",
    "DAYOFMONTH",
    "DAY_OF_MONTH",
    "DAYOFWEEK",
    "DAY_OF_WEEK",
    "DAYOFYEAR",
    "DAY_OF_YEAR",
    "FROM_DAYS",
    "FROM_UNIXTIME",
    "HOUR",
    "HOUR_OF_DAY",
    "LAST_DAY",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "MAKEDATE",
    "MAKETIME",
    "MICROSECOND",
    "MINUTE",
    "MINUTE_OF_DAY",
    "MINUTE_OF_HOUR",
    "MONTH",
    "MONTHNAME",
    "MONTH_OF_YEAR",
    "NOW",
    "PERIOD_ADD",
    "PERIOD_DIFF",
    "QUARTER",
    "SEC_TO_TIME",
    "SECOND",
    "SECOND_OF_MINUTE",
    "STR_TO_DATE",
    "SUBDATE",
    "SUBTIME",
    "SYSDATE",
    "TIME",
    "TIME_FORMAT",
    "TIME_TO_SEC",
    "TIMEDIFF",
    "TIMESTAMP",
    "TO_DAYS",
    "TO_SECONDS",
    "UNIX_TIMESTAMP",
    "UTC_DATE",
    "UTC_TIME",
    "UTC_TIMESTAMP",
    "WEEK",
    "WEEKDAY",
    "WEEK_OF_YEAR",
    "WEEKOFYEAR",
    "YEAR",
    "YEARWEEK",
];

const TEXT: &[&str] = &[
    "SUBSTRING", "SUBSTR", "TRIM", "LTRIM", "RTRIM", "LOWER", "UPPER", "CONCAT", "CONCAT_WS",
    "LENGTH", "STRCMP", "RIGHT", "LEFT", "ASCII", "LOCATE", "REPLACE", "REVERSE",
];

const FLOW_CONTROL: &[&str] = &["IF", "IFNULL", "NULLIF", "ISNULL"];

const SYSTEM: &[&str] = &["TYPEOF"];

const SCORE: &[&str] = &["SCORE", "SCOREQUERY", "SCORE_QUERY"];

const NO_FIELD_RELEVANCE: &[&str] = &["QUERY"];

const SINGLE_FIELD_RELEVANCE: &[&str] = &[
    "MATCH",
    "MATCHQUERY",
    "MATCH_QUERY",
    "MATCH_PHRASE",
    "MATCHPHRASE",
    "MATCHPHRASEQUERY",
    "MATCH_BOOL_PREFIX",
    "MATCH_PHRASE_PREFIX",
    "WILDCARD_QUERY",
    "WILDCARDQUERY",
];

const MULTI_FIELD_RELEVANCE: &[&str] = &[
    "MULTI_MATCH",
    "MULTIMATCH",
    "MULTIMATCHQUERY",
    "SIMPLE_QUERY_STRING",
    "QUERY_STRING",
];

const ALTERNATE_SINGLE_FIELD: &[&str] = &["MATCH_QUERY", "MATCHQUERY", "MATCH_PHRASE", "MATCHPHRASE"];

const ALTERNATE_MULTI_FIELD: &[&str] = &["MULTI_MATCH", "MULTIMATCH"];

const RELEVANCE_ARGS: &[&str] = &[
    "ALLOW_LEADING_WILDCARD",
    "ANALYZER",
    "ANALYZE_WILDCARD",
    "AUTO_GENERATE_SYNONYMS_PHRASE_QUERY",
    "BOOST",
    "CASE_INSENSITIVE",
    "CUTOFF_FREQUENCY",
    "DEFAULT_FIELD",
    "DEFAULT_OPERATOR",
    "ENABLE_POSITION_INCREMENTS",
    "ESCAPE",
    "FIELDS",
    "FLAGS",
    "FUZZINESS",
    "FUZZY_MAX_EXPANSIONS",
    "FUZZY_PREFIX_LENGTH",
    "FUZZY_REWRITE",
    "FUZZY_TRANSPOSITIONS",
    "LENIENT",
    "LOW_FREQ_OPERATOR",
    "MAX_DETERMINIZED_STATES",
    "MAX_EXPANSIONS",
    "MINIMUM_SHOULD_MATCH",
    "OPERATOR",
    "PHRASE_SLOP",
    "PREFIX_LENGTH",
    "QUOTE_ANALYZER",
    "QUOTE_FIELD_SUFFIX",
    "REWRITE",
    "SLOP",
    "TIE_BREAKER",
    "TIME_ZONE",
    "TYPE",
    "ZERO_TERMS_QUERY",
];

const HIGHLIGHT_ARGS: &[&str] = &[
    "HIGHLIGHT_PRE_TAGS",
    "HIGHLIGHT_POST_TAGS",
    "PRE_TAGS",
    "POST_TAGS",
];

fn contains(list: &[&str], upper: &str) -> bool {
    list.contains(&upper)
}

/// The family a function name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionFamily {
    /// `NESTED`: either `nested(path.*)` or a scalar call.
    Nested,
    Scalar(ScalarCategory),
    Ranking(RankingFunction),
    Aggregate(AggregateName),
    Percentile(PercentileName),
    Score,
    NoFieldRelevance,
    SingleFieldRelevance,
    MultiFieldRelevance,
    Highlight,
    Position,
    Extract,
    GetFormat,
    Timestamp(TimestampFunction),
}

/// Classifies an upper-cased function name.
#[must_use]
pub fn classify(upper: &str) -> Option<FunctionFamily> {
    if upper == "NESTED" {
        return Some(FunctionFamily::Nested);
    }
    if let Some(category) = scalar_category(upper) {
        return Some(FunctionFamily::Scalar(category));
    }
    if let Some(function) = RankingFunction::from_name(upper) {
        return Some(FunctionFamily::Ranking(function));
    }
    if let Some(function) = AggregateName::from_name(upper) {
        return Some(FunctionFamily::Aggregate(function));
    }
    if let Some(function) = PercentileName::from_name(upper) {
        return Some(FunctionFamily::Percentile(function));
    }
    if contains(SCORE, upper) {
        return Some(FunctionFamily::Score);
    }
    if contains(NO_FIELD_RELEVANCE, upper) {
        return Some(FunctionFamily::NoFieldRelevance);
    }
    if contains(SINGLE_FIELD_RELEVANCE, upper) {
        return Some(FunctionFamily::SingleFieldRelevance);
    }
    if contains(MULTI_FIELD_RELEVANCE, upper) {
        return Some(FunctionFamily::MultiFieldRelevance);
    }
    match upper {
        "HIGHLIGHT" => Some(FunctionFamily::Highlight),
        "POSITION" => Some(FunctionFamily::Position),
        "EXTRACT" => Some(FunctionFamily::Extract),
        "GET_FORMAT" => Some(FunctionFamily::GetFormat),
        _ => TimestampFunction::from_name(upper).map(FunctionFamily::Timestamp),
    }
}

/// Scalar category of an upper-cased name.
#[must_use]
pub fn scalar_category(upper: &str) -> Option<ScalarCategory> {
    let categories = [
        (MATHEMATICAL, ScalarCategory::Mathematical),
        (TRIGONOMETRIC, ScalarCategory::Trigonometric),
        (ARITHMETIC, ScalarCategory::Arithmetic),
        (DATE_TIME, ScalarCategory::DateTime),
        (TEXT, ScalarCategory::Text),
        (FLOW_CONTROL, ScalarCategory::FlowControl),
        (SYSTEM, ScalarCategory::System),
    ];
    categories
        .iter()
        .find(|(names, _)| contains(names, upper))
        .map(|(_, category)| *category)
}

/// Names usable in the `field = name(...)` relevance form.
#[must_use]
pub fn is_alternate_relevance(upper: &str) -> bool {
    contains(ALTERNATE_SINGLE_FIELD, upper) || contains(ALTERNATE_MULTI_FIELD, upper)
}

#[must_use]
pub fn is_alternate_multi_field(upper: &str) -> bool {
    contains(ALTERNATE_MULTI_FIELD, upper)
}

/// Names that may start a relevance call inside `SCORE(...)`.
#[must_use]
pub fn is_relevance(upper: &str) -> bool {
    contains(NO_FIELD_RELEVANCE, upper)
        || contains(SINGLE_FIELD_RELEVANCE, upper)
        || contains(MULTI_FIELD_RELEVANCE, upper)
}

#[must_use]
pub fn is_relevance_arg(upper: &str) -> bool {
    contains(RELEVANCE_ARGS, upper)
}

#[must_use]
pub fn is_highlight_arg(upper: &str) -> bool {
    contains(HIGHLIGHT_ARGS, upper)
}
