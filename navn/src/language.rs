//! Language identifiers for the Windows and Macintosh name record platforms.
//!
//! See the [name table languages] in the OpenType spec.
//!
//! [name table languages]: https://learn.microsoft.com/en-us/typography/opentype/spec/name#windows-language-ids

/// The Macintosh script code for Roman, the only Mac script we can encode.
pub const MAC_SCRIPT_ROMAN: u16 = 0;

/// Windows language IDs and their tags.
///
/// When a tag appears more than once, the first entry is the one used for
/// tag to ID lookup.
static WINDOWS_LANGUAGES: &[(u16, &str)] = &[
    (0x0436, "af"),
    (0x041C, "sq"),
    (0x0484, "gsw"),
    (0x045E, "am"),
    (0x1401, "ar-DZ"),
    (0x3C01, "ar-BH"),
    (0x0C01, "ar"),
    (0x0801, "ar-IQ"),
    (0x2C01, "ar-JO"),
    (0x3401, "ar-KW"),
    (0x3001, "ar-LB"),
    (0x1001, "ar-LY"),
    (0x1801, "ary"),
    (0x2001, "ar-OM"),
    (0x4001, "ar-QA"),
    (0x0401, "ar-SA"),
    (0x2801, "ar-SY"),
    (0x1C01, "aeb"),
    (0x3801, "ar-AE"),
    (0x2401, "ar-YE"),
    (0x042B, "hy"),
    (0x044D, "as"),
    (0x082C, "az-Cyrl"),
    (0x042C, "az"),
    (0x046D, "ba"),
    (0x042D, "eu"),
    (0x0423, "be"),
    (0x0845, "bn"),
    (0x0445, "bn-IN"),
    (0x201A, "bs-Cyrl"),
    (0x141A, "bs"),
    (0x047E, "br"),
    (0x0402, "bg"),
    (0x0403, "ca"),
    (0x0C04, "zh-HK"),
    (0x1404, "zh-MO"),
    (0x0804, "zh"),
    (0x1004, "zh-SG"),
    (0x0404, "zh-TW"),
    (0x0483, "co"),
    (0x041A, "hr"),
    (0x101A, "hr-BA"),
    (0x0405, "cs"),
    (0x0406, "da"),
    (0x048C, "prs"),
    (0x0465, "dv"),
    (0x0813, "nl-BE"),
    (0x0413, "nl"),
    (0x0C09, "en-AU"),
    (0x2809, "en-BZ"),
    (0x1009, "en-CA"),
    (0x2409, "en-029"),
    (0x4009, "en-IN"),
    (0x1809, "en-IE"),
    (0x2009, "en-JM"),
    (0x4409, "en-MY"),
    (0x1409, "en-NZ"),
    (0x3409, "en-PH"),
    (0x4809, "en-SG"),
    (0x1C09, "en-ZA"),
    (0x2C09, "en-TT"),
    (0x0809, "en-GB"),
    (0x0409, "en"),
    (0x3009, "en-ZW"),
    (0x0425, "et"),
    (0x0438, "fo"),
    (0x0464, "fil"),
    (0x040B, "fi"),
    (0x080C, "fr-BE"),
    (0x0C0C, "fr-CA"),
    (0x040C, "fr"),
    (0x140C, "fr-LU"),
    (0x180C, "fr-MC"),
    (0x100C, "fr-CH"),
    (0x0462, "fy"),
    (0x0456, "gl"),
    (0x0437, "ka"),
    (0x0C07, "de-AT"),
    (0x0407, "de"),
    (0x1407, "de-LI"),
    (0x1007, "de-LU"),
    (0x0807, "de-CH"),
    (0x0408, "el"),
    (0x046F, "kl"),
    (0x0447, "gu"),
    (0x0468, "ha"),
    (0x040D, "he"),
    (0x0439, "hi"),
    (0x040E, "hu"),
    (0x040F, "is"),
    (0x0470, "ig"),
    (0x0421, "id"),
    (0x045D, "iu"),
    (0x085D, "iu-Latn"),
    (0x083C, "ga"),
    (0x0434, "xh"),
    (0x0435, "zu"),
    (0x0410, "it"),
    (0x0810, "it-CH"),
    (0x0411, "ja"),
    (0x044B, "kn"),
    (0x043F, "kk"),
    (0x0453, "km"),
    (0x0486, "quc"),
    (0x0487, "rw"),
    (0x0441, "sw"),
    (0x0457, "kok"),
    (0x0412, "ko"),
    (0x0440, "ky"),
    (0x0454, "lo"),
    (0x0426, "lv"),
    (0x0427, "lt"),
    (0x082E, "dsb"),
    (0x046E, "lb"),
    (0x042F, "mk"),
    (0x083E, "ms-BN"),
    (0x043E, "ms"),
    (0x044C, "ml"),
    (0x043A, "mt"),
    (0x0481, "mi"),
    (0x047A, "arn"),
    (0x044E, "mr"),
    (0x047C, "moh"),
    (0x0450, "mn"),
    (0x0850, "mn-CN"),
    (0x0461, "ne"),
    (0x0414, "nb"),
    (0x0814, "nn"),
    (0x0482, "oc"),
    (0x0448, "or"),
    (0x0463, "ps"),
    (0x0415, "pl"),
    (0x0416, "pt"),
    (0x0816, "pt-PT"),
    (0x0446, "pa"),
    (0x046B, "qu-BO"),
    (0x086B, "qu-EC"),
    (0x0C6B, "qu"),
    (0x0418, "ro"),
    (0x0417, "rm"),
    (0x0419, "ru"),
    (0x243B, "smn"),
    (0x103B, "smj-NO"),
    (0x143B, "smj"),
    (0x0C3B, "se-FI"),
    (0x043B, "se"),
    (0x083B, "se-SE"),
    (0x203B, "sms"),
    (0x183B, "sma-NO"),
    (0x1C3B, "sma"),
    (0x044F, "sa"),
    (0x1C1A, "sr-Cyrl-BA"),
    (0x0C1A, "sr"),
    (0x181A, "sr-Latn-BA"),
    (0x081A, "sr-Latn"),
    (0x046C, "nso"),
    (0x0432, "tn"),
    (0x045B, "si"),
    (0x041B, "sk"),
    (0x0424, "sl"),
    (0x2C0A, "es-AR"),
    (0x400A, "es-BO"),
    (0x340A, "es-CL"),
    (0x240A, "es-CO"),
    (0x140A, "es-CR"),
    (0x1C0A, "es-DO"),
    (0x300A, "es-EC"),
    (0x440A, "es-SV"),
    (0x100A, "es-GT"),
    (0x480A, "es-HN"),
    (0x080A, "es-MX"),
    (0x4C0A, "es-NI"),
    (0x180A, "es-PA"),
    (0x3C0A, "es-PY"),
    (0x280A, "es-PE"),
    (0x500A, "es-PR"),
    (0x040A, "es"),
    (0x0C0A, "es"),
    (0x540A, "es-US"),
    (0x380A, "es-UY"),
    (0x200A, "es-VE"),
    (0x081D, "sv-FI"),
    (0x041D, "sv"),
    (0x045A, "syr"),
    (0x0428, "tg"),
    (0x085F, "tzm"),
    (0x0449, "ta"),
    (0x0444, "tt"),
    (0x044A, "te"),
    (0x041E, "th"),
    (0x0451, "bo"),
    (0x041F, "tr"),
    (0x0442, "tk"),
    (0x0480, "ug"),
    (0x0422, "uk"),
    (0x042E, "hsb"),
    (0x0420, "ur"),
    (0x0843, "uz-Cyrl"),
    (0x0443, "uz"),
    (0x042A, "vi"),
    (0x0452, "cy"),
    (0x0488, "wo"),
    (0x0485, "sah"),
    (0x0478, "ii"),
    (0x046A, "yo"),
];

/// Macintosh language codes, their tags and the script each is written in.
static MAC_LANGUAGES: &[(u16, &str, u16)] = &[
    (0, "en", 0),
    (1, "fr", 0),
    (2, "de", 0),
    (3, "it", 0),
    (4, "nl", 0),
    (5, "sv", 0),
    (6, "es", 0),
    (7, "da", 0),
    (8, "pt", 0),
    (9, "no", 0),
    (10, "he", 5),
    (11, "ja", 1),
    (12, "ar", 4),
    (13, "fi", 0),
    (14, "el", 6),
    (15, "is", 0),
    (16, "mt", 0),
    (17, "tr", 0),
    (18, "hr", 0),
    (19, "zh-Hant", 2),
    (20, "ur", 4),
    (21, "hi", 9),
    (22, "th", 21),
    (23, "ko", 3),
    (24, "lt", 29),
    (25, "pl", 29),
    (26, "hu", 29),
    (27, "et", 29),
    (28, "lv", 29),
    (29, "se", 0),
    (30, "fo", 0),
    (31, "fa", 4),
    (32, "ru", 7),
    (33, "zh", 25),
    (34, "nl-BE", 0),
    (35, "ga", 0),
    (36, "sq", 0),
    (37, "ro", 0),
    (38, "cs", 29),
    (39, "sk", 29),
    (40, "sl", 0),
    (41, "yi", 5),
    (42, "sr", 7),
    (43, "mk", 7),
    (44, "bg", 7),
    (45, "uk", 7),
    (46, "be", 7),
    (47, "uz", 7),
    (48, "kk", 7),
    (49, "az-Cyrl", 7),
    (50, "az-Arab", 4),
    (51, "hy", 24),
    (52, "ka", 23),
    (53, "mo", 7),
    (54, "ky", 7),
    (55, "tg", 7),
    (56, "tk", 7),
    (57, "mn-CN", 27),
    (58, "mn", 7),
    (59, "ps", 4),
    (60, "ks", 4),
    (61, "ku", 4),
    (62, "sd", 4),
    (63, "bo", 26),
    (64, "ne", 9),
    (65, "sa", 9),
    (66, "mr", 9),
    (67, "bn", 13),
    (68, "as", 13),
    (69, "gu", 11),
    (70, "pa", 10),
    (71, "or", 12),
    (72, "ml", 17),
    (73, "kn", 16),
    (74, "ta", 14),
    (75, "te", 15),
    (76, "si", 18),
    (77, "my", 19),
    (78, "km", 20),
    (79, "lo", 22),
    (80, "vi", 30),
    (81, "id", 0),
    (82, "tl", 0),
    (83, "ms", 0),
    (84, "ms-Arab", 4),
    (85, "am", 28),
    (86, "ti", 28),
    (87, "om", 28),
    (88, "so", 0),
    (89, "sw", 0),
    (90, "rw", 0),
    (91, "rn", 0),
    (92, "ny", 0),
    (93, "mg", 0),
    (94, "eo", 0),
    (128, "cy", 0),
    (129, "eu", 0),
    (130, "ca", 0),
    (131, "la", 0),
    (132, "qu", 0),
    (133, "gn", 0),
    (134, "ay", 0),
    (135, "tt", 7),
    (136, "ug", 4),
    (137, "dz", 26),
    (138, "jv", 0),
    (139, "su", 0),
    (140, "gl", 0),
    (141, "af", 0),
    (142, "br", 0),
    (143, "iu", 28),
    (144, "gd", 0),
    (145, "gv", 0),
    (146, "ga-Latg", 0),
    (147, "to", 0),
    (148, "el-polyton", 6),
    (149, "kl", 0),
    (150, "az", 0),
    (151, "nn", 0),
];

/// Returns the Windows language ID for `tag`, ignoring ASCII case.
pub fn windows_language_id(tag: &str) -> Option<u16> {
    WINDOWS_LANGUAGES
        .iter()
        .find(|(_, lang)| lang.eq_ignore_ascii_case(tag))
        .map(|(id, _)| *id)
}

/// Returns the Macintosh language code for `tag`, ignoring ASCII case.
pub fn mac_language_id(tag: &str) -> Option<u16> {
    MAC_LANGUAGES
        .iter()
        .find(|(_, lang, _)| lang.eq_ignore_ascii_case(tag))
        .map(|(id, ..)| *id)
}

pub fn windows_language_tag(id: u16) -> Option<&'static str> {
    WINDOWS_LANGUAGES
        .iter()
        .find(|(lang_id, _)| *lang_id == id)
        .map(|(_, tag)| *tag)
}

pub fn mac_language_tag(id: u16) -> Option<&'static str> {
    MAC_LANGUAGES
        .iter()
        .find(|(lang_id, ..)| *lang_id == id)
        .map(|(_, tag, _)| *tag)
}

/// The script code used to encode strings in the given Mac language.
pub fn mac_script(mac_language_id: u16) -> Option<u16> {
    MAC_LANGUAGES
        .iter()
        .find(|(lang_id, ..)| *lang_id == mac_language_id)
        .map(|(.., script)| *script)
}

/// All known Windows language tags, sorted and without duplicates.
pub fn windows_languages() -> Vec<&'static str> {
    sorted_tags(WINDOWS_LANGUAGES.iter().map(|(_, tag)| *tag))
}

/// All known Macintosh language tags, sorted and without duplicates.
pub fn mac_languages() -> Vec<&'static str> {
    sorted_tags(MAC_LANGUAGES.iter().map(|(_, tag, _)| *tag))
}

fn sorted_tags(tags: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
    let mut tags: Vec<_> = tags.collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", 0x0409)]
    #[case("EN", 0x0409)]
    #[case("de", 0x0407)]
    #[case("fr-CA", 0x0C0C)]
    #[case("es", 0x040A)]
    #[case("zh-TW", 0x0404)]
    fn windows_lookup(#[case] tag: &str, #[case] id: u16) {
        assert_eq!(windows_language_id(tag), Some(id));
    }

    #[rstest]
    #[case("en", 0)]
    #[case("fr", 1)]
    #[case("it", 3)]
    #[case("cy", 128)]
    fn mac_lookup(#[case] tag: &str, #[case] id: u16) {
        assert_eq!(mac_language_id(tag), Some(id));
    }

    #[test]
    fn unknown_tags() {
        assert_eq!(windows_language_id("xx-nope"), None);
        assert_eq!(mac_language_id(""), None);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(windows_language_tag(0x0409), Some("en"));
        assert_eq!(windows_language_tag(0x0C0A), Some("es"));
        assert_eq!(mac_language_tag(2), Some("de"));
        assert_eq!(mac_language_tag(200), None);
    }

    #[test]
    fn scripts() {
        assert_eq!(mac_script(0), Some(MAC_SCRIPT_ROMAN));
        assert_eq!(mac_script(11), Some(1));
        assert_eq!(mac_script(1000), None);
    }

    #[test]
    fn listings_are_sorted_and_unique() {
        let win = windows_languages();
        assert!(win.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(win.iter().filter(|tag| **tag == "es").count(), 1);
        let mac = mac_languages();
        assert!(mac.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(mac.len(), MAC_LANGUAGES.len());
    }
}
