//! How a link is rendered depends on where it appears.

/// Every position on a page where a type or member reference is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkContext {
    Default,
    AllClassesFrame,
    Class,
    Member,
    ClassUse,
    Index,
    ConstantSummary,
    SerializedForm,
    SerialMember,
    Package,
    SeeTag,
    ValueTag,
    Tree,
    PackageFrame,
    ClassHeader,
    ClassSignature,
    ReturnType,
    SummaryReturnType,
    ExecutableMemberParam,
    SuperInterfaces,
    ImplementedInterfaces,
    ImplementedClasses,
    Subinterfaces,
    Subclasses,
    ClassSignatureParentName,
    MethodDocCopy,
    MethodSpecifiedBy,
    MethodOverrides,
    Annotation,
    FieldDocCopy,
    ClassTreeParent,
    MemberTypeParams,
    ClassUseHeader,
}

/// Rendering flags for one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Type variables and wildcards become links to their declaring class.
    pub include_type_params: bool,
    /// Type parameters are appended inside the class link label.
    pub include_type_in_label: bool,
    /// Type arguments are appended after the link as separate links.
    pub include_type_as_separate_link: bool,
    pub exclude_bounds: bool,
    pub strong_by_default: bool,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        LinkPolicy {
            include_type_params: true,
            include_type_in_label: true,
            include_type_as_separate_link: false,
            exclude_bounds: false,
            strong_by_default: false,
        }
    }
}

pub fn policy_for(context: LinkContext) -> LinkPolicy {
    use LinkContext::*;
    let base = LinkPolicy::default();
    match context {
        AllClassesFrame | PackageFrame | ImplementedClasses | Subclasses | MethodDocCopy
        | FieldDocCopy => LinkPolicy {
            include_type_in_label: false,
            ..base
        },
        ClassUseHeader => LinkPolicy {
            include_type_in_label: false,
            strong_by_default: true,
            ..base
        },
        Annotation => LinkPolicy {
            include_type_params: false,
            exclude_bounds: true,
            ..base
        },
        ImplementedInterfaces | SuperInterfaces | Subinterfaces | ClassSignatureParentName => {
            LinkPolicy {
                include_type_params: false,
                include_type_in_label: false,
                include_type_as_separate_link: true,
                exclude_bounds: true,
                ..base
            }
        }
        ClassTreeParent | Tree => LinkPolicy {
            include_type_params: false,
            include_type_in_label: false,
            include_type_as_separate_link: true,
            exclude_bounds: true,
            strong_by_default: true,
        },
        Package | ClassUse | ClassHeader | ClassSignature => LinkPolicy {
            include_type_params: false,
            include_type_in_label: false,
            include_type_as_separate_link: true,
            ..base
        },
        MemberTypeParams => LinkPolicy {
            include_type_in_label: false,
            include_type_as_separate_link: true,
            ..base
        },
        ReturnType | SummaryReturnType | ExecutableMemberParam => LinkPolicy {
            exclude_bounds: true,
            ..base
        },
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_contexts_use_default() {
        for ctx in [
            LinkContext::Default,
            LinkContext::Member,
            LinkContext::SeeTag,
            LinkContext::ValueTag,
            LinkContext::Index,
        ] {
            assert_eq!(policy_for(ctx), LinkPolicy::default());
        }
    }

    #[test]
    fn annotation_hides_type_parameters() {
        let p = policy_for(LinkContext::Annotation);
        assert!(!p.include_type_params);
        assert!(p.exclude_bounds);
        assert!(p.include_type_in_label);
    }

    #[test]
    fn signature_contexts_separate_type_arguments() {
        for ctx in [
            LinkContext::ClassSignature,
            LinkContext::ClassHeader,
            LinkContext::ImplementedInterfaces,
            LinkContext::ClassSignatureParentName,
        ] {
            let p = policy_for(ctx);
            assert!(p.include_type_as_separate_link, "{:?}", ctx);
            assert!(!p.include_type_in_label, "{:?}", ctx);
            assert!(!p.include_type_params, "{:?}", ctx);
        }
    }

    #[test]
    fn return_types_drop_bounds() {
        assert!(policy_for(LinkContext::ReturnType).exclude_bounds);
        assert!(policy_for(LinkContext::ExecutableMemberParam).exclude_bounds);
        assert!(!policy_for(LinkContext::MemberTypeParams).exclude_bounds);
    }

    #[test]
    fn tree_links_are_strong() {
        assert!(policy_for(LinkContext::Tree).strong_by_default);
        assert!(policy_for(LinkContext::ClassUseHeader).strong_by_default);
        assert!(!policy_for(LinkContext::Class).strong_by_default);
    }
}
