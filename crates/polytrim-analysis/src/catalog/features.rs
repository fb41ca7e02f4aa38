//! Built-in feature catalog, tracking core-js 3.x module names.
//!
//! Entry order is significant: one-slot indices (global names, static-member
//! owners) keep the last registration under the default conflict policy.

use super::rules::{ArgumentPredicate, CatalogEntry};

pub(crate) fn builtin_entries() -> Vec<CatalogEntry> {
    let g = CatalogEntry::global;
    let s = CatalogEntry::static_member;
    let m = CatalogEntry::method;
    let p = CatalogEntry::property;

    let mut entries = vec![
        g("es.aggregate-error.cause", "AggregateError"),
        g("es.aggregate-error.constructor", "AggregateError"),
        // array buffer
        g("es.array-buffer.constructor", "ArrayBuffer"),
        s("es.array-buffer.is-view", "ArrayBuffer", "isView"),
        m("es.array-buffer.slice", "slice"),
        // array
        m("es.array.at", "at"),
        m("es.array.concat", "concat"),
        m("es.array.copy-within", "copyWithin"),
        m("es.array.every", "every"),
        m("es.array.fill", "fill"),
        m("es.array.filter", "filter"),
        m("es.array.find-index", "findIndex"),
        m("es.array.find-last-index", "findLastIndex"),
        m("es.array.find-last", "findLast"),
        m("es.array.find", "find"),
        m("es.array.flat-map", "flatMap"),
        m("es.array.flat", "flat"),
        m("es.array.for-each", "forEach"),
        s("es.array.from", "Array", "from"),
        m("es.array.includes", "includes"),
        m("es.array.index-of", "indexOf"),
        s("es.array.is-array", "Array", "isArray"),
        m("es.array.iterator", "entries"),
        m("es.array.iterator", "keys"),
        m("es.array.iterator", "values"),
        m("es.array.join", "join"),
        m("es.array.last-index-of", "lastIndexOf"),
        m("es.array.map", "map"),
        s("es.array.of", "Array", "of"),
        m("es.array.push", "push"),
        m("es.array.reduce", "reduce"),
        m("es.array.reduce-right", "reduceRight"),
        m("es.array.reverse", "reverse"),
        m("es.array.slice", "slice"),
        m("es.array.some", "some"),
        m("es.array.sort", "sort"),
        m("es.array.splice", "splice"),
        m("es.array.to-reversed", "toReversed"),
        m("es.array.to-sorted", "toSorted"),
        m("es.array.to-spliced", "toSpliced"),
        m("es.array.unshift", "unshift"),
        m("es.array.with", "with"),
        s("es.array.species", "Symbol", "species"),
        // data view
        g("es.data-view.constructor", "DataView"),
        // es.error.to-string is undetectable: template strings call it implicitly.
        // function
        m("es.function.bind", "bind"),
        s("es.function.has-instance", "Symbol", "hasInstance"),
        p("es.function.name", "name"),
        g("es.global-this", "globalThis"),
        s("es.json.stringify", "JSON", "stringify"),
        g("es.map.constructor", "Map"),
        g("es.number.constructor", "Number"),
        // object
        s("es.object.assign", "Object", "assign"),
        s("es.object.get-own-property-symbols", "Object", "getOwnPropertySymbols"),
        s("es.object.has-own", "Object", "hasOwn"),
        s("es.object.keys", "Object", "keys"),
        s("es.object.values", "Object", "values"),
        g("es.parse-float", "parseFloat"),
        g("es.parse-int", "parseInt"),
        // promise
        s("es.promise.all", "Promise", "all"),
        s("es.promise.all-settled", "Promise", "allSettled"),
        s("es.promise.any", "Promise", "any"),
        m("es.promise.catch", "catch"),
        g("es.promise.constructor", "Promise"),
        s("es.promise.race", "Promise", "race"),
        s("es.promise.reject", "Promise", "reject"),
        s("es.promise.resolve", "Promise", "resolve"),
        m("es.promise.finally", "finally"),
        // regexp
        g("es.regexp.constructor", "RegExp"),
        p("es.regexp.flags", "flags"),
        g("es.set.constructor", "Set"),
        // string
        m("es.string.at-alternative", "at"),
        m("es.string.match", "match"),
        m("es.string.match-all", "matchAll"),
        m("es.string.repeat", "repeat"),
        m("es.string.replace", "replace"),
        m("es.string.replace-all", "replaceAll"),
        // symbol
        s("es.symbol.async-iterator", "Symbol", "asyncIterator"),
        g("es.symbol.constructor", "Symbol"),
        p("es.symbol.description", "description"),
        s("es.symbol.for", "Symbol", "for"),
        s("es.symbol.has-instance", "Symbol", "hasInstance"),
        s("es.symbol.is-concat-spreadable", "Symbol", "isConcatSpreadable"),
        s("es.symbol.iterator", "Symbol", "iterator"),
        s("es.symbol.key-for", "Symbol", "keyFor"),
        s("es.symbol.match-all", "Symbol", "matchAll"),
        s("es.symbol.match", "Symbol", "match"),
        s("es.symbol.replace", "Symbol", "replace"),
        s("es.symbol.search", "Symbol", "search"),
        s("es.symbol.species", "Symbol", "species"),
        s("es.symbol.split", "Symbol", "split"),
        s("es.symbol.to-primitive", "Symbol", "toPrimitive"),
        s("es.symbol.to-string-tag", "Symbol", "toStringTag"),
        s("es.symbol.unscopables", "Symbol", "unscopables"),
        // typed array
        m("es.typed-array.at", "at"),
        m("es.typed-array.fill", "fill"),
        m("es.typed-array.find-index", "findIndex"),
        m("es.typed-array.find-last-index", "findLastIndex"),
        m("es.typed-array.find-last", "findLast"),
        m("es.typed-array.find", "find"),
        g("es.typed-array.float32-array", "Float32Array"),
        g("es.typed-array.float64-array", "Float64Array"),
        m("es.typed-array.for-each", "forEach"),
        m("es.typed-array.set", "set"),
        m("es.typed-array.sort", "sort"),
        m("es.typed-array.to-locale-string", "toLocaleString"),
        m("es.typed-array.to-reversed", "toReversed"),
        m("es.typed-array.to-sorted", "toSorted"),
        m("es.typed-array.to-string", "toString"),
        m("es.typed-array.with", "with"),
        g("es.escape", "escape"),
        g("es.unescape", "unescape"),
        g("es.weak-map.constructor", "WeakMap"),
        g("es.weak-set.constructor", "WeakSet"),
    ];

    for (name, id) in TYPED_ARRAYS {
        entries.push(s("es.typed-array.from", name, "from"));
        entries.push(s("es.typed-array.of", name, "of"));
        entries.push(g(id, name));
    }

    for id in MATH_FUNCTIONS {
        let member = id.rsplit('.').next().unwrap_or(id);
        entries.push(s(id, "Math", member));
    }

    // `new Error(message, { cause })`
    for name in ERROR_CONSTRUCTORS {
        entries.push(CatalogEntry::call(
            "es.error.cause",
            name,
            ArgumentPredicate::Exactly(2),
        ));
    }

    for (id, member) in NUMBER_STATICS {
        entries.push(s(id, "Number", member));
    }

    entries
}

const TYPED_ARRAYS: [(&str, &str); 9] = [
    ("Float32Array", "es.typed-array.float32-array"),
    ("Float64Array", "es.typed-array.float64-array"),
    ("Int8Array", "es.typed-array.int8-array"),
    ("Int16Array", "es.typed-array.int16-array"),
    ("Int32Array", "es.typed-array.int32-array"),
    ("Uint8Array", "es.typed-array.uint8-array"),
    ("Uint8ClampedArray", "es.typed-array.uint8-clamped-array"),
    ("Uint16Array", "es.typed-array.uint16-array"),
    ("Uint32Array", "es.typed-array.uint32-array"),
];

const MATH_FUNCTIONS: [&str; 17] = [
    "es.math.acosh",
    "es.math.asinh",
    "es.math.atanh",
    "es.math.cbrt",
    "es.math.clz32",
    "es.math.cosh",
    "es.math.expm1",
    "es.math.fround",
    "es.math.hypot",
    "es.math.imul",
    "es.math.log10",
    "es.math.log1p",
    "es.math.log2",
    "es.math.sign",
    "es.math.sinh",
    "es.math.tanh",
    "es.math.trunc",
];

const ERROR_CONSTRUCTORS: [&str; 10] = [
    "Error",
    "EvalError",
    "RangeError",
    "ReferenceError",
    "SyntaxError",
    "TypeError",
    "URIError",
    "CompileError",
    "LinkError",
    "RuntimeError",
];

// TODO: es.number.to-exponential, to-fixed and to-precision need a
// receiver-type check; a generic method rule would match every `toFixed`.
const NUMBER_STATICS: [(&str, &str); 10] = [
    ("es.number.epsilon", "EPSILON"),
    ("es.number.is-finite", "isFinite"),
    ("es.number.is-integer", "isInteger"),
    ("es.number.is-nan", "isNaN"),
    ("es.number.is-safe-integer", "isSafeInteger"),
    ("es.number.max-safe-integer", "MAX_SAFE_INTEGER"),
    ("es.number.min-safe-integer", "MIN_SAFE_INTEGER"),
    ("es.number.parse-float", "parseFloat"),
    ("es.number.parse-int", "parseInt"),
    ("es.number.is-integer", "isInteger"),
];
