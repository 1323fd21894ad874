use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use invsys_db::TableSchema;
use invsys_http::error::AppError;
use invsys_kernel::{AppState, InitCtx, Module};
use serde::Serialize;
use serde_json::json;

/// A route module backed by the tables it owns.
pub struct ResourceModule {
    name: &'static str,
    tag: &'static str,
    tables: &'static [TableSchema],
}

impl ResourceModule {
    pub const fn new(name: &'static str, tag: &'static str, tables: &'static [TableSchema]) -> Self {
        Self { name, tag, tables }
    }
}

#[derive(Debug, Serialize)]
pub struct ModuleSummary {
    pub module: &'static str,
    pub tables: Vec<TableRows>,
}

#[derive(Debug, Serialize)]
pub struct TableRows {
    pub table: &'static str,
    pub rows: u64,
}

#[async_trait]
impl Module for ResourceModule {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::debug!(
            module = self.name,
            backend = ctx.db.backend(),
            tables = self.tables.len(),
            "module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router<AppState> {
        let module = self.name;
        let tables = self.tables;

        Router::new()
            .route(
                "/",
                get(move |State(state): State<AppState>| summary(state, module, tables)),
            )
            .route(
                "/{table}",
                get(
                    move |State(state): State<AppState>, Path(table): Path<String>| {
                        table_rows(state, module, tables, table)
                    },
                ),
            )
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": format!("Row counts for the {} module", self.name),
                        "tags": [self.tag],
                        "responses": {
                            "200": {
                                "description": "Row count per owned table",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ModuleSummary" }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{table}": {
                    "get": {
                        "summary": format!("Row count of one {} table", self.name),
                        "tags": [self.tag],
                        "parameters": [{
                            "name": "table",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Row count of the table",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/TableRows" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Table not owned by this module",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "ModuleSummary": {
                        "type": "object",
                        "properties": {
                            "module": { "type": "string" },
                            "tables": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/TableRows" }
                            }
                        },
                        "required": ["module", "tables"]
                    },
                    "TableRows": {
                        "type": "object",
                        "properties": {
                            "table": { "type": "string" },
                            "rows": { "type": "integer", "minimum": 0 }
                        },
                        "required": ["table", "rows"]
                    }
                }
            }
        }))
    }

    fn tables(&self) -> Vec<TableSchema> {
        self.tables.to_vec()
    }
}

async fn summary(
    state: AppState,
    module: &'static str,
    tables: &'static [TableSchema],
) -> Result<Json<ModuleSummary>, AppError> {
    let mut counts = Vec::with_capacity(tables.len());
    for table in tables {
        counts.push(TableRows {
            table: table.name,
            rows: state.db.count_rows(table.name).await?,
        });
    }

    Ok(Json(ModuleSummary {
        module,
        tables: counts,
    }))
}

async fn table_rows(
    state: AppState,
    module: &'static str,
    tables: &'static [TableSchema],
    table: String,
) -> Result<Json<TableRows>, AppError> {
    let Some(owned) = tables.iter().find(|owned| owned.name == table) else {
        return Err(AppError::not_found(format!(
            "module `{module}` has no table `{table}`"
        )));
    };

    Ok(Json(TableRows {
        table: owned.name,
        rows: state.db.count_rows(owned.name).await?,
    }))
}
