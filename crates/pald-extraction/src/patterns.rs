//! Static compiled pattern tables, ported from
//! `original_source/src/logic/pald_light_extraction.py`. Follows the
//! `LazyLock<Vec<Regex>>` idiom used in `xchecker-validation`.

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern literal is a valid regex")
}

pub struct TypeKeywords {
    pub cartoon: LazyLock<Regex>,
    pub object: LazyLock<Regex>,
    pub animal: LazyLock<Regex>,
    pub fantasy_figure: LazyLock<Regex>,
    pub human: LazyLock<Regex>,
}

pub static TYPE_KEYWORDS: TypeKeywords = TypeKeywords {
    cartoon: LazyLock::new(|| compile(r"(?i)\b(cartoon|animated|animation)\b")),
    object: LazyLock::new(|| compile(r"(?i)\b(object|portrait|still life|3d model)\b")),
    animal: LazyLock::new(|| compile(r"(?i)\b(animal|dog|cat|horse|bird|dragon)\b")),
    fantasy_figure: LazyLock::new(|| compile(r"(?i)\b(fantasy|unicorn|elf|orc|alien|fairy)\b")),
    human: LazyLock::new(|| {
        compile(r"(?i)\b(person|human|man|woman|male|female|boy|girl|teacher|student|adult|child)\b")
    }),
};

pub static CARTOON_ANIMATED: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(animated|moving|animation)\b"));
pub static CARTOON_STATIC: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(static|still|picture)\b"));
pub static CHARACTER_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)(mickey\s*mouse|spongebob|superman|batman|wonder\s*woman|pikachu|mario|sonic)")
});

pub static OTHER_CHARACTERISTICS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        "realistic",
        "stylized",
        "abstract",
        "minimalist",
        "detailed",
        "simple",
        "complex",
    ]
    .iter()
    .map(|word| (compile(&format!(r"(?i)\b{word}\b")), *word))
    .collect()
});

/// Ordered, highest-score-first, `(pattern, score)` pairs shared by the five
/// 1-7 integer scales. Each scale has its own adjective vocabulary but the same
/// monotonic "first match wins" structure.
pub fn ranked_scale(words_by_score_desc: &[(i64, &[&str])]) -> Vec<(Regex, i64)> {
    words_by_score_desc
        .iter()
        .map(|(score, words)| {
            let alt = words.join("|");
            (compile(&format!(r"(?i)\b({alt})\b")), *score)
        })
        .collect()
}

pub static LIFELIKENESS_SCALE: LazyLock<Vec<(Regex, i64)>> = LazyLock::new(|| {
    ranked_scale(&[
        (7, &["photorealistic", "extremely lifelike", "indistinguishable from real"]),
        (6, &["very lifelike", "very realistic"]),
        (5, &["lifelike", "realistic"]),
        (4, &["somewhat realistic", "semi-realistic"]),
        (3, &["stylized", "cartoon-like"]),
        (2, &["abstract", "simplified"]),
        (1, &["artificial", "fake", "clearly synthetic"]),
    ])
});

pub static REALISM_SCALE: LazyLock<Vec<(Regex, i64)>> = LazyLock::new(|| {
    ranked_scale(&[
        (7, &["photographic", "hyper.?realistic"]),
        (6, &["very realistic"]),
        (5, &["realistic"]),
        (4, &["fairly realistic"]),
        (3, &["somewhat stylized"]),
        (2, &["stylized", "cartoonish"]),
        (1, &["unrealistic", "abstract"]),
    ])
});

pub static ANIMATION_LEVEL_SCALE: LazyLock<Vec<(Regex, i64)>> = LazyLock::new(|| {
    ranked_scale(&[
        (7, &["fully animated", "constantly moving"]),
        (6, &["highly animated"]),
        (5, &["animated", "moves", "moving"]),
        (4, &["some movement", "partially animated"]),
        (3, &["minimal movement"]),
        (2, &["mostly still"]),
        (1, &["static", "motionless", "still"]),
    ])
});

pub static LIKEABILITY_SCALE: LazyLock<Vec<(Regex, i64)>> = LazyLock::new(|| {
    ranked_scale(&[
        (7, &["extremely likeable", "adorable", "charming"]),
        (6, &["very likeable", "very friendly"]),
        (5, &["likeable", "friendly", "warm"]),
        (4, &["pleasant"]),
        (3, &["neutral"]),
        (2, &["unfriendly", "cold"]),
        (1, &["unlikeable", "off.?putting", "unpleasant"]),
    ])
});

pub static COMPETENCE_SCALE: LazyLock<Vec<(Regex, i64)>> = LazyLock::new(|| {
    ranked_scale(&[
        (7, &["highly competent", "expert", "masterful"]),
        (6, &["very competent", "skilled"]),
        (5, &["competent", "capable"]),
        (4, &["adequate", "reasonably competent"]),
        (3, &["somewhat competent"]),
        (2, &["inexperienced", "unskilled"]),
        (1, &["incompetent", "clueless"]),
    ])
});

pub static ROLE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\b(teacher|instructor|educator|tutor)\b"), "teacher"),
        (compile(r"(?i)\b(assistant|helper|aide|support)\b"), "assistant"),
        (compile(r"(?i)\b(guide|mentor|coach|advisor)\b"), "guide"),
        (compile(r"(?i)\b(expert|specialist|professional|consultant)\b"), "expert"),
        (compile(r"(?i)\b(friend|companion|buddy|peer)\b"), "friend"),
    ]
});

pub static ROLE_MODEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)like\s+([^,.\n]+)"),
        compile(r"(?i)similar\s+to\s+([^,.\n]+)"),
        compile(r"(?i)based\s+on\s+([^,.\n]+)"),
    ]
});

pub static AGE_NUMERIC: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)(\d+)\s*years?\s*old"));
pub static AGE_CATEGORIES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\b(child|kid)\b"), "child"),
        (compile(r"(?i)\b(young\s+adult|young)\b"), "young"),
        (compile(r"(?i)\bteen(ager)?\b"), "teenager"),
        (compile(r"(?i)\b(adult|grown.?up)\b"), "adult"),
        (compile(r"(?i)\b(elderly|old|senior)\b"), "elderly"),
    ]
});

pub static GENDER_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\b(female|woman|girl|she)\b"), "female"),
        (compile(r"(?i)\b(male|man|boy|he)\b"), "male"),
        (compile(r"(?i)\b(non.?binary|enby)\b"), "non-binary"),
        (compile(r"(?i)\bother\s+gender\b"), "other"),
    ]
});

pub static CLOTHING_CAPTURES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        compile(r"(?i)wearing\s+([^,.\n]+)"),
        compile(r"(?i)dressed\s+in\s+([^,.\n]+)"),
        compile(r"(?i)clothes?\s*:\s*([^,.\n]+)"),
        compile(r"(?i)outfit\s*:\s*([^,.\n]+)"),
    ]
});

pub static CLOTHING_VOCAB: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\b(shirt|blouse|top)\b"), "shirt"),
        (compile(r"(?i)\b(pants|trousers|jeans)\b"), "pants"),
        (compile(r"(?i)\b(dress|skirt)\b"), "dress"),
        (compile(r"(?i)\b(suit|jacket|coat)\b"), "suit"),
        (compile(r"(?i)\b(uniform|costume)\b"), "uniform"),
        (compile(r"(?i)\b(casual|formal)\b"), "casual"),
    ]
});

pub static WEIGHT_VOCAB: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\b(slim|thin|skinny|slender)\b"), "slim"),
        (compile(r"(?i)\b(average|normal|medium)\b"), "average"),
        (compile(r"(?i)\b(heavy|overweight|large|big)\b"), "heavy"),
        (compile(r"(?i)\b(athletic|muscular|fit|strong)\b"), "athletic"),
        (compile(r"(?i)\b(petite|small|tiny)\b"), "petite"),
    ]
});

pub static OTHER_FEATURES_CAPTURES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)hair\s*:\s*([^,.;\n]+)"), "hair"),
        (compile(r"(?i)eyes\s*:\s*([^,.;\n]+)"), "eyes"),
        (compile(r"(?i)skin\s*:\s*([^,.;\n]+)"), "skin"),
        (compile(r"(?i)voice\s*:\s*([^,.;\n]+)"), "voice"),
    ]
});

/// Minimal fallback-path gender/age scan, used only when normal extraction
/// raises — the same vocabulary as the primary tables, kept as independent
/// statics so the fallback path never depends on the primary path's state.
pub static FALLBACK_GENDER: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\b(female|woman|girl|she)\b"), "female"),
        (compile(r"(?i)\b(male|man|boy|he)\b"), "male"),
    ]
});
pub static FALLBACK_AGE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"(?i)\b(child|kid)\b"), "child"),
        (compile(r"(?i)\b(adult|grown.?up)\b"), "adult"),
        (compile(r"(?i)\b(elderly|old|senior)\b"), "elderly"),
    ]
});
