use modforge::schema::{
    ArgDef, EnumDef, EnumValueDef, FieldDef, InputDef, InputFieldDef, ObjectDef, ScalarDef,
    Schema, TypeDef, TypeRef,
};

/// A small but representative engine schema: two scalars, two objects (one
/// of them the root), one enum and one input type.
pub fn engine_schema() -> Schema {
    Schema {
        types: vec![
            TypeDef::Scalar(ScalarDef {
                name: "ContainerId".into(),
                description: "A unique container identifier.".into(),
            }),
            TypeDef::Scalar(ScalarDef {
                name: "Platform".into(),
                description: "An OS/architecture pair.".into(),
            }),
            TypeDef::Object(ObjectDef {
                name: "Query".into(),
                description: "The root of the API graph.".into(),
                fields: vec![
                    FieldDef {
                        name: "container".into(),
                        description: "An empty container.".into(),
                        args: vec![],
                        ty: TypeRef::named("Container"),
                        module_only: false,
                    },
                    FieldDef {
                        name: "defaultPlatform".into(),
                        description: "The engine's default platform.".into(),
                        args: vec![],
                        ty: TypeRef::named("Platform"),
                        module_only: false,
                    },
                ],
            }),
            TypeDef::Object(ObjectDef {
                name: "Container".into(),
                description: "An OCI-compatible container.".into(),
                fields: vec![
                    FieldDef {
                        name: "fromImage".into(),
                        description: "Initialize from a registry address.".into(),
                        args: vec![ArgDef {
                            name: "address".into(),
                            description: String::new(),
                            ty: TypeRef::named("String"),
                        }],
                        ty: TypeRef::named("Container"),
                        module_only: false,
                    },
                    FieldDef {
                        name: "withExec".into(),
                        description: "Append a command to execute.".into(),
                        args: vec![ArgDef {
                            name: "args".into(),
                            description: String::new(),
                            ty: TypeRef::list_of("String"),
                        }],
                        ty: TypeRef::named("Container"),
                        module_only: false,
                    },
                    FieldDef {
                        name: "stdout".into(),
                        description: "Standard output of the last command.".into(),
                        args: vec![],
                        ty: TypeRef::named("String"),
                        module_only: false,
                    },
                    FieldDef {
                        name: "id".into(),
                        description: String::new(),
                        args: vec![],
                        ty: TypeRef::named("ContainerId"),
                        module_only: false,
                    },
                    FieldDef {
                        name: "export".into(),
                        description: "Write the container image to the module's host.".into(),
                        args: vec![ArgDef {
                            name: "path".into(),
                            description: String::new(),
                            ty: TypeRef::named("String"),
                        }],
                        ty: TypeRef::named("Boolean"),
                        module_only: true,
                    },
                ],
            }),
            TypeDef::Enum(EnumDef {
                name: "CacheSharingMode".into(),
                description: "Sharing mode of a cache volume.".into(),
                values: vec![
                    EnumValueDef {
                        name: "SHARED".into(),
                        description: "Shared across writers.".into(),
                    },
                    EnumValueDef {
                        name: "PRIVATE".into(),
                        description: String::new(),
                    },
                    EnumValueDef {
                        name: "LOCKED".into(),
                        description: String::new(),
                    },
                ],
            }),
            TypeDef::Input(InputDef {
                name: "BuildArg".into(),
                description: "A build-time variable.".into(),
                fields: vec![
                    InputFieldDef {
                        name: "name".into(),
                        description: String::new(),
                        ty: TypeRef::named("String"),
                        optional: false,
                    },
                    InputFieldDef {
                        name: "value".into(),
                        description: String::new(),
                        ty: TypeRef::named("String"),
                        optional: true,
                    },
                ],
            }),
        ],
    }
}
