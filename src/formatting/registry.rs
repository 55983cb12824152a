//! Mapping node kinds to the layout rule that formats them

use std::collections::HashMap;

use tracing::debug;

/// Every layout rule the formatter knows. Most correspond to one grammar
/// construct; the first four are generic and only ever reached through an
/// explicit registration (or, for Default, as the fallback).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Default,
    Null,
    Line,
    SpaceSeparated,
    PreprocDirective,
    ModuleDecl,
    ExportDecl,
    GlobalDecl,
    Initializer,
    Init,
    RedefEnumDecl,
    RedefRecordDecl,
    TypeDecl,
    Type,
    TypeSpec,
    EnumBody,
    FuncDecl,
    FuncHdr,
    FuncHdrVariant,
    FuncParams,
    FuncBody,
    FormalArgs,
    FormalArg,
    CaptureList,
    Stmt,
    ExprList,
    CaseList,
    CaseTypeList,
    EventHdr,
    Expr,
    Nl,
    Attr,
    MinorComment,
    ZeekygenComment,
    ZeekygenPrevComment,
}

/// Construct rules that can be found by name. A kind like `module_decl`
/// is matched by title-casing its segments into `ModuleDecl`.
const NAMES: &[(&str, Rule)] = &[
    ("PreprocDirective", Rule::PreprocDirective),
    ("ModuleDecl", Rule::ModuleDecl),
    ("ExportDecl", Rule::ExportDecl),
    ("GlobalDecl", Rule::GlobalDecl),
    ("Initializer", Rule::Initializer),
    ("Init", Rule::Init),
    ("RedefEnumDecl", Rule::RedefEnumDecl),
    ("RedefRecordDecl", Rule::RedefRecordDecl),
    ("TypeDecl", Rule::TypeDecl),
    ("Type", Rule::Type),
    ("TypeSpec", Rule::TypeSpec),
    ("EnumBody", Rule::EnumBody),
    ("FuncDecl", Rule::FuncDecl),
    ("FuncHdr", Rule::FuncHdr),
    ("FuncHdrVariant", Rule::FuncHdrVariant),
    ("FuncParams", Rule::FuncParams),
    ("FuncBody", Rule::FuncBody),
    ("FormalArgs", Rule::FormalArgs),
    ("FormalArg", Rule::FormalArg),
    ("CaptureList", Rule::CaptureList),
    ("Stmt", Rule::Stmt),
    ("ExprList", Rule::ExprList),
    ("CaseList", Rule::CaseList),
    ("CaseTypeList", Rule::CaseTypeList),
    ("EventHdr", Rule::EventHdr),
    ("Expr", Rule::Expr),
    ("Nl", Rule::Nl),
    ("Attr", Rule::Attr),
    ("MinorComment", Rule::MinorComment),
    ("ZeekygenComment", Rule::ZeekygenComment),
    ("ZeekygenPrevComment", Rule::ZeekygenPrevComment),
];

impl Rule {
    /// Look up a construct rule by its name.
    pub fn from_name(name: &str) -> Option<Rule> {
        NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, rule)| rule)
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Rule::MinorComment | Rule::ZeekygenComment | Rule::ZeekygenPrevComment
        )
    }
}

/// Turn `redef_enum_decl` into `RedefEnumDecl`.
fn convention(kind: &str) -> String {
    kind.split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Which rule formats which kind of node. Lookups that succeed by naming
/// convention are remembered, so each kind is only derived once.
#[derive(Clone, Debug)]
pub struct Registry {
    explicit: HashMap<String, Rule>,
    derived: HashMap<String, Rule>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Registry {
    /// A registry with the standard explicit mappings for kinds whose
    /// names don't line up with a rule of their own.
    pub fn new() -> Registry {
        let mut registry = Registry::empty();

        for kind in ["const_decl", "global_decl", "option_decl", "redef_decl"] {
            registry.register(kind, Rule::GlobalDecl);
        }
        for kind in ["func", "hook", "event"] {
            registry.register(kind, Rule::FuncHdrVariant);
        }
        for kind in ["capture", "attr_list", "interval"] {
            registry.register(kind, Rule::SpaceSeparated);
        }
        for kind in ["zeekygen_head_comment", "zeekygen_next_comment"] {
            registry.register(kind, Rule::ZeekygenComment);
        }
        registry.register("nullnode", Rule::Null);

        registry
    }

    /// A registry with no explicit mappings at all.
    pub fn empty() -> Registry {
        Registry {
            explicit: HashMap::new(),
            derived: HashMap::new(),
        }
    }

    pub fn register(&mut self, kind: &str, rule: Rule) {
        self.explicit
            .insert(kind.to_string(), rule);
    }

    /// Find the rule for a named node kind: explicit mapping first, then
    /// naming convention, else the generic default.
    pub fn resolve(&mut self, kind: &str) -> Rule {
        if let Some(&rule) = self
            .explicit
            .get(kind)
        {
            return rule;
        }
        if let Some(&rule) = self
            .derived
            .get(kind)
        {
            return rule;
        }

        match Rule::from_name(&convention(kind)) {
            Some(rule) => {
                debug!(kind, ?rule, "derived rule");
                self.derived
                    .insert(kind.to_string(), rule);
                rule
            }
            None => Rule::Default,
        }
    }
}
