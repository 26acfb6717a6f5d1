//! Registered Mongo errors.
//!
//! One table, one entry per symbolic Mongo error name. Each entry becomes a
//! [`MongoError`](crate::MongoError) constant with its host code computed
//! during const evaluation, and the whole table is listed in [`REGISTERED`]
//! for startup validation and lookup.
//!
//! ```rust
//! use helio_errors::{mongo, RANGE_BASE};
//!
//! assert_eq!(mongo::BadValue.native().value(), 2);
//! assert_eq!(mongo::BadValue.host().value(), RANGE_BASE.value() + 2);
//! ```
//!
//! # Governance
//!
//! - Values are the native codes of the Mongo protocol and never change.
//!   Adding a name is compatible; renumbering one breaks clients.
//! - Out-of-range values fail const evaluation, so a bad entry fails the build.
//! - Names are Rust identifiers in one module: a repeated name does not compile.
//! - `LocationNNNNN` entries are the protocol's numbered assertion sites.
//!   Two names may share a value; see [`Registry::validate`](crate::Registry::validate).
//! - Order follows the upstream table and is not strictly numeric.

use crate::define_mongo_errors;

define_mongo_errors! {
    /// Unexpected internal failure.
    InternalError                               = 1,
    /// A supplied value is invalid for the requested operation.
    BadValue                                    = 2,
    GraphContainsCycle                          = 5,
    /// Input could not be parsed.
    FailedToParse                               = 9,
    /// A value has the wrong BSON type.
    TypeMismatch                                = 14,
    Overflow                                    = 15,
    AlreadyInitialized                          = 23,
    /// The target collection or database does not exist.
    NamespaceNotFound                           = 26,
    IndexNotFound                               = 27,
    PathNotViable                               = 28,
    CannotBackfillArray                         = 34,
    ConflictingUpdateOperators                  = 40,
    CursorNotFound                              = 43,
    NamespaceExists                             = 48,
    DollarPrefixedFieldName                     = 52,
    CanNotBeTypeArray                           = 53,
    NotSingleValueField                         = 54,
    EmptyFieldName                              = 56,
    DottedFieldName                             = 57,
    ShardKeyNotFound                            = 61,
    ImmutableField                              = 66,
    CannotCreateIndex                           = 67,
    IndexAlreadyExists                          = 68,
    InvalidOptions                              = 72,
    InvalidNamespace                            = 73,
    IndexOptionsConflict                        = 85,
    IndexKeySpecsConflict                       = 86,
    NotExactValueField                          = 111,
    /// The command is recognized but not supported.
    CommandNotSupported                         = 115,
    NamespaceNotSharded                         = 118,
    ExceededMemoryLimit                         = 146,
    DurationOverflow                            = 159,
    ViewDepthLimitExceeded                      = 165,
    CommandNotSupportedOnView                   = 166,
    OptionNotSupportedOnView                    = 167,
    AmbiguousIndexKeyPattern                    = 181,
    InvalidIndexSpecificationOption             = 197,
    QueryFeatureNotAllowed                      = 224,
    MaxSubPipelineDepthExceeded                 = 232,
    ConversionFailure                           = 241,
    OperationNotSupportedInTransaction          = 263,
    IndexBuildAborted                           = 276,
    CollectionUUIDMismatch                      = 361,
    DollarRandInvalidArg                        = 10_065,
    BsonObjectTooLarge                          = 10_334,
    BackgroundOperationInProgressForNamespace   = 12_587,
    Location13026                               = 13_026,
    Location13027                               = 13_027,
    Location13068                               = 13_068,
    DbAlreadyExists                             = 13_297,
    Location13548                               = 13_548,
    Location15947                               = 15_947,
    Location15952                               = 15_952,
    Location15955                               = 15_955,
    Location15957                               = 15_957,
    Location15958                               = 15_958,
    Location15959                               = 15_959,
    Location15972                               = 15_972,
    Location15976                               = 15_976,
    Location15981                               = 15_981,
    Location16004                               = 16_004,
    Location16006                               = 16_006,
    Location16007                               = 16_007,
    ExpressionTakesExactlyNArgs                 = 16_020,
    Location16034                               = 16_034,
    Location16035                               = 16_035,
    Location16410                               = 16_410,
    Location16411                               = 16_411,
    DollarAddNumericOrDateTypes                 = 16_554,
    DollarModByZeroProhibited                   = 16_610,
    DollarModOnlyNumeric                        = 16_611,
    DollarAddOnlyOneDate                        = 16_612,
    Location16702                               = 16_702,
    Location16747                               = 16_747,
    Location16748                               = 16_748,
    Location16749                               = 16_749,
    Location16755                               = 16_755,
    Location16764                               = 16_764,
    HashedIndexDoNotSupportArrayValues          = 16_766,
    Location16800                               = 16_800,
    Location16801                               = 16_801,
    Location16804                               = 16_804,
    DollarOutTempCollectionCantBeCreated        = 16_994,
    Location17040                               = 17_040,
    Location17041                               = 17_041,
    Location17042                               = 17_042,
    Location17043                               = 17_043,
    Location17044                               = 17_044,
    Location17045                               = 17_045,
    Location17046                               = 17_046,
    Location17047                               = 17_047,
    Location17048                               = 17_048,
    Location17049                               = 17_049,
    DollarCondMissingIfParameter                = 17_080,
    DollarCondMissingThenParameter              = 17_081,
    DollarCondMissingElseParameter              = 17_082,
    DollarCondBadParameter                      = 17_083,
    DollarSizeRequiresArray                     = 17_124,
    Location17261                               = 17_261,
    Location17276                               = 17_276,
    Location17308                               = 17_308,
    Location17310                               = 17_310,
    DocumentAfterUpdateLargerThanMaxSize        = 17_419,
    DocumentToUpsertLargerThanMaxSize           = 17_420,
    Location18628                               = 18_628,
    Location18629                               = 18_629,
    Location18533                               = 18_533,
    Location18534                               = 18_534,
    Location18535                               = 18_535,
    Location18536                               = 18_536,
    Location18537                               = 18_537,
    Location28625                               = 28_625,
    Location28646                               = 28_646,
    Location28647                               = 28_647,
    Location28648                               = 28_648,
    Location28650                               = 28_650,
    Location28651                               = 28_651,
    Location28656                               = 28_656,
    Location28657                               = 28_657,
    Location28664                               = 28_664,
    RangeArgumentExpressionArgsOutOfRange       = 28_667,
    DollarAbsCantTakeLongMinValue               = 28_680,
    ArrayOperatorElemAtFirstArgMustBeArray      = 28_689,
    DollarArrayElemAtSecondArgArgMustBeNumeric  = 28_690,
    DollarArrayElemAtSecondArgArgMustBe32Bit    = 28_691,
    DollarSqrtGreaterOrEqualToZero              = 28_714,
    DollarSliceInvalidInput                     = 28_724,
    DollarSliceInvalidTypeSecondArg             = 28_725,
    DollarSliceInvalidValueSecondArg            = 28_726,
    DollarSliceInvalidTypeThirdArg              = 28_727,
    DollarSliceInvalidValueThirdArg             = 28_728,
    DollarSliceInvalidSignThirdArg              = 28_729,
    Location28745                               = 28_745,
    Location28746                               = 28_746,
    Location28747                               = 28_747,
    Location28748                               = 28_748,
    Location28749                               = 28_749,
    DollarLogArgumentMustBeNumeric              = 28_756,
    DollarLogBaseMustBeNumeric                  = 28_757,
    DollarLogNumberMustBePositive               = 28_758,
    DollarLogBaseMustBeGreaterThanOne           = 28_759,
    DollarLog10MustBePositiveNumber             = 28_761,
    DollarPowBaseMustBeNumeric                  = 28_762,
    DollarPowExponentMustBeNumeric              = 28_763,
    DollarPowExponentInvalidForZeroBase         = 28_764,
    Location28765                               = 28_765,
    DollarLnMustBePositiveNumber                = 28_766,
    Location28769                               = 28_769,
    Location28803                               = 28_803,
    Location28808                               = 28_808,
    Location28809                               = 28_809,
    Location28810                               = 28_810,
    Location28811                               = 28_811,
    Location28812                               = 28_812,
    Location28818                               = 28_818,
    Location28822                               = 28_822,
    KeyCannotContainNullByte                    = 31_032,
    Location31002                               = 31_002,
    Location31022                               = 31_022,
    Location31023                               = 31_023,
    Location31024                               = 31_024,
    Location31034                               = 31_034,
    Location31095                               = 31_095,
    Location31109                               = 31_109,
    Location31119                               = 31_119,
    Location31120                               = 31_120,
    Location31138                               = 31_138,
    Location31249                               = 31_249,
    Location31250                               = 31_250,
    Location31253                               = 31_253,
    Location31254                               = 31_254,
    Location31256                               = 31_256,
    Location31271                               = 31_271,
    Location31276                               = 31_276,
    Location31308                               = 31_308,
    Location31325                               = 31_325,
    Location31393                               = 31_393,
    Location31395                               = 31_395,
    Location34435                               = 34_435,
    Location31441                               = 31_441,
    Location34443                               = 34_443,
    Location34444                               = 34_444,
    Location34445                               = 34_445,
    Location34446                               = 34_446,
    Location34447                               = 34_447,
    Location34448                               = 34_448,
    Location34449                               = 34_449,
    Location34450                               = 34_450,
    Location34451                               = 34_451,
    Location34452                               = 34_452,
    Location34453                               = 34_453,
    Location34454                               = 34_454,
    Location34455                               = 34_455,
    Location34471                               = 34_471,
    Location34473                               = 34_473,
    DollarSwitchRequiresObject                  = 40_060,
    DollarSwitchRequiresArrayForBranches        = 40_061,
    DollarSwitchRequiresObjectForEachBranch     = 40_062,
    DollarSwitchUnknownArgumentForBranch        = 40_063,
    DollarSwitchRequiresCaseExpressionForBranch = 40_064,
    DollarSwitchRequiresThenExpressionForBranch = 40_065,
    DollarSwitchNoMatchingBranchAndNoDefault    = 40_066,
    DollarSwitchBadArgument                     = 40_067,
    DollarSwitchRequiresAtLeastOneBranch        = 40_068,
    DollarInRequiresArray                       = 40_081,
    Location40085                               = 40_085,
    Location40086                               = 40_086,
    Location40087                               = 40_087,
    Location40090                               = 40_090,
    Location40091                               = 40_091,
    Location40092                               = 40_092,
    Location40093                               = 40_093,
    Location40094                               = 40_094,
    Location40096                               = 40_096,
    Location40097                               = 40_097,
    Location40100                               = 40_100,
    Location40101                               = 40_101,
    Location40102                               = 40_102,
    Location40103                               = 40_103,
    Location40104                               = 40_104,
    Location40105                               = 40_105,
    Location40147                               = 40_147,
    Location40156                               = 40_156,
    Location40158                               = 40_158,
    Location40160                               = 40_160,
    Location40169                               = 40_169,
    Location40177                               = 40_177,
    Location40185                               = 40_185,
    Location40218                               = 40_218,
    Location40228                               = 40_228,
    Location40234                               = 40_234,
    Location40238                               = 40_238,
    Location40272                               = 40_272,
    Location40319                               = 40_319,
    Location40321                               = 40_321,
    Location40323                               = 40_323,
    /// The command name is unknown.
    UnrecognizedCommand                         = 40_324,
    Location40352                               = 40_352,
    DollarArrayToObjectRequiresArray            = 40_386,
    DollarObjectToArrayRequiresObject           = 40_390,
    DollarArrayToObjectAllMustBeObjects         = 40_391,
    DollarArrayToObjectIncorrectNumberOfKeys    = 40_392,
    DollarArrayToObjectRequiresObjectWithKAndV  = 40_393,
    DollarArrayToObjectObjectKeyMustBeString    = 40_394,
    DollarArrayToObjectArrayKeyMustBeString     = 40_395,
    DollarArrayToObjectAllMustBeArrays          = 40_396,
    DollarArrayToObjectIncorrectArrayLength     = 40_397,
    DollarArrayToObjectBadInputTypeFormat       = 40_398,
    DollarMergeObjectsInvalidType               = 40_400,
    UnknownBsonField                            = 40_415,
    Location40485                               = 40_485,
    Location40489                               = 40_489,
    Location40515                               = 40_515,
    Location40516                               = 40_516,
    Location40517                               = 40_517,
    Location40518                               = 40_518,
    Location40519                               = 40_519,
    Location40520                               = 40_520,
    Location40521                               = 40_521,
    Location40522                               = 40_522,
    Location40523                               = 40_523,
    Location40524                               = 40_524,
    Location40525                               = 40_525,
    Location40533                               = 40_533,
    Location40535                               = 40_535,
    Location40536                               = 40_536,
    Location40539                               = 40_539,
    Location40600                               = 40_600,
    Location40602                               = 40_602,
    Location50694                               = 50_694,
    Location50695                               = 50_695,
    Location50696                               = 50_696,
    Location50699                               = 50_699,
    Location50700                               = 50_700,
    Location50723                               = 50_723,
    Location50752                               = 50_752,
    Location50759                               = 50_759,
    Location51024                               = 51_024,
    Location51047                               = 51_047,
    Location51074                               = 51_074,
    Location51075                               = 51_075,
    DollarRoundOverflowInt64                    = 51_080,
    DollarRoundFirstArgMustBeNumeric            = 51_081,
    DollarRoundPrecisionMustBeIntegral          = 51_082,
    DollarRoundPrecisionOutOfRange              = 51_083,
    Location51091                               = 51_091,
    Location51103                               = 51_103,
    Location51104                               = 51_104,
    Location51105                               = 51_105,
    Location51106                               = 51_106,
    Location51107                               = 51_107,
    Location51108                               = 51_108,
    Location51109                               = 51_109,
    Location51110                               = 51_110,
    Location51111                               = 51_111,
    Location51151                               = 51_151,
    Location51156                               = 51_156,
    Location51246                               = 51_246,
    Location51276                               = 51_276,
    Location51247                               = 51_247,
    Location51743                               = 51_743,
    Location51744                               = 51_744,
    Location51745                               = 51_745,
    Location51746                               = 51_746,
    Location51747                               = 51_747,
    Location51748                               = 51_748,
    Location51749                               = 51_749,
    Location51750                               = 51_750,
    Location51751                               = 51_751,
    Location327391                              = 327_391,
    Location327392                              = 327_392,
    DollarIfNullRequiresAtLeastTwoArgs          = 1_257_300,
    DollarRandNonEmptyArgument                  = 3_040_501,
    IntermediateResultTooLarge                  = 4_031_700,
    DollarSetFieldRequiresObject                = 4_161_100,
    DollarSetFieldUnknownArgument               = 4_161_101,
    Location4161102                             = 4_161_102,
    Location4161103                             = 4_161_103,
    Location4161104                             = 4_161_104,
    Location4161105                             = 4_161_105,
    Location4161106                             = 4_161_106,
    Location4161107                             = 4_161_107,
    Location4161108                             = 4_161_108,
    Location4161109                             = 4_161_109,
    Location4940400                             = 4_940_400,
    Location4940401                             = 4_940_401,
    Location5107200                             = 5_107_200,
    Location5107201                             = 5_107_201,
    Location5439007                             = 5_439_007,
    Location5439008                             = 5_439_008,
    Location5439009                             = 5_439_009,
    Location5439010                             = 5_439_010,
    Location5439012                             = 5_439_012,
    Location5439013                             = 5_439_013,
    Location5439014                             = 5_439_014,
    Location5439015                             = 5_439_015,
    Location5439016                             = 5_439_016,
    Location5439017                             = 5_439_017,
    Location5439018                             = 5_439_018,
    Location5787801                             = 5_787_801,
    Location5787901                             = 5_787_901,
    Location5787902                             = 5_787_902,
    Location5787903                             = 5_787_903,
    Location5787906                             = 5_787_906,
    Location5787907                             = 5_787_907,
    Location5787908                             = 5_787_908,
    Location5788200                             = 5_788_200,
    Location5858203                             = 5_858_203,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RANGE_BASE, RANGE_END, is_in_range};
    use std::collections::HashSet;

    #[test]
    fn table_is_complete() {
        assert_eq!(REGISTERED.len(), 348);
        assert_eq!(REGISTERED[0].name(), "InternalError");
        assert_eq!(REGISTERED[REGISTERED.len() - 1].name(), "Location5858203");
    }

    #[test]
    fn every_entry_is_in_range() {
        for entry in REGISTERED {
            assert!(is_in_range(entry.host()), "{} escaped the window", entry.name());
            assert!(entry.host() >= RANGE_BASE && entry.host() <= RANGE_END);
        }
    }

    #[test]
    fn names_match_identifiers() {
        assert_eq!(BadValue.name(), "BadValue");
        assert_eq!(DollarIfNullRequiresAtLeastTwoArgs.native().value(), 1_257_300);
        assert_eq!(Location5858203.native().value(), 5_858_203);
        assert_eq!(UnrecognizedCommand.native().value(), 40_324);
    }

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for entry in REGISTERED {
            assert!(seen.insert(entry.name()), "duplicate name {}", entry.name());
        }
    }

    #[test]
    fn declaration_order_is_preserved() {
        let position = |name: &str| REGISTERED.iter().position(|e| e.name() == name);
        assert!(position("Location18628") < position("Location18533"));
        assert!(position("KeyCannotContainNullByte") < position("Location31002"));
    }
}
