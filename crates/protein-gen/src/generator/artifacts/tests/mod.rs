use serde_json::json;

use super::{
  ArtifactContext, ArtifactUnit,
  dao::DaoGenerator,
  database::DatabaseGenerator,
  domain::DomainGenerator,
  entities::EntityGenerator,
  enums::EnumGenerator,
  map_helpers::{MAP_HELPER, MapHelperGenerator, PUT_MAP_HELPER},
  mappers::MapperGenerator,
  sync_dto::SyncDtoGenerator,
  triggers::{TriggerGenerator, UNDO_LOG_SETUP},
};
use crate::generator::{
  naming::NamingResolver,
  tests::support::{config, resolve, sync_fixture},
  traversal::ModelPlan,
};

fn source_of(units: &[ArtifactUnit], name: &str) -> String {
  units
    .iter()
    .find(|unit| unit.name() == name)
    .map(ArtifactUnit::source)
    .unwrap_or_else(|| panic!("no unit named {name}"))
}

#[test]
fn test_sync_dto_matches_wire_shape() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = SyncDtoGenerator::new(&context).units(&plan);

  let names = units.iter().map(ArtifactUnit::name).collect::<Vec<_>>();
  assert_eq!(
    names,
    vec!["SyncDataDto", "CustomerDto", "OrderDto", "ColorGroupDto", "ColorDto", "OrderLineDto"]
  );
  assert!(units.iter().all(|unit| unit.package() == "com.acme.sync.entity"));

  let expected = "\
// Generated by protein-gen. DO NOT EDIT.

package com.acme.sync.entity

import com.google.gson.annotations.SerializedName
import java.util.Date

data class OrderDto(
    @SerializedName(\"id\")
    val id: Int? = null,
    @SerializedName(\"customer\")
    val customer: CustomerDto? = null,
    @SerializedName(\"status\")
    val status: String? = null,
    @SerializedName(\"total\")
    val total: Float? = null,
    @SerializedName(\"lines\")
    val lines: List<OrderLineDto> = listOf(),
    @SerializedName(\"tags\")
    val tags: List<String> = listOf(),
    @SerializedName(\"isDeleted\")
    val isDeleted: Boolean? = null,
    @SerializedName(\"modified\")
    val modified: Date? = null
)
";
  assert_eq!(source_of(&units, "OrderDto"), expected);
}

#[test]
fn test_group_dto_arrays_are_mutable() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = SyncDtoGenerator::new(&context).units(&plan);

  let group = source_of(&units, "ColorGroupDto");
  assert!(group.contains("    var colors: List<ColorDto> = listOf()\n"));
  assert!(group.contains("    val name: String? = null,\n"));

  let root = source_of(&units, "SyncDataDto");
  assert!(root.contains("    val orders: List<OrderDto> = listOf(),\n"));
}

#[test]
fn test_entity_with_foreign_key() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = EntityGenerator::new(&context).units(&plan);

  let expected = "\
// Generated by protein-gen. DO NOT EDIT.

package com.acme.database.entity

import androidx.room.ColumnInfo
import androidx.room.Entity
import androidx.room.ForeignKey
import androidx.room.Index
import androidx.room.PrimaryKey
import com.acme.model.OrderStatus
import java.util.Date

@Entity(
    tableName = \"order\",
    indices = [
        Index(value = [\"id_customer\"])
    ],
    foreignKeys = [
        ForeignKey(
            entity = Customer::class,
            parentColumns = [\"id_customer\"],
            childColumns = [\"id_customer\"],
            onDelete = ForeignKey.CASCADE,
            onUpdate = ForeignKey.CASCADE
        )
    ]
)
data class Order(
    @PrimaryKey(autoGenerate = true)
    @ColumnInfo(name = \"id_order\")
    override var id: Int? = null,
    @ColumnInfo(name = \"id_customer\")
    var idCustomer: Int? = null,
    @ColumnInfo(name = \"status\")
    var status: OrderStatus? = null,
    @ColumnInfo(name = \"total\")
    var total: Float? = null,
    @ColumnInfo(name = \"tags\")
    var tags: List<String> = listOf(),
    @ColumnInfo(name = \"is_deleted\")
    override var isDeleted: Boolean? = null,
    @ColumnInfo(name = \"modified\")
    override var modified: Date? = null
) : DeletableEntity
";
  assert_eq!(source_of(&units, "Order"), expected);
}

#[test]
fn test_entity_supertypes_and_capabilities() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = EntityGenerator::new(&context).units(&plan);

  let names = units.iter().map(ArtifactUnit::name).collect::<Vec<_>>();
  assert_eq!(
    names,
    vec!["Customer", "Order", "ColorGroup", "Color", "OrderLine", "ColorGroupLink"]
  );

  let customer = source_of(&units, "Customer");
  assert!(customer.contains("@Entity(tableName = \"customer\")\ndata class Customer("));
  assert!(customer.contains("    override var isFavorite: Boolean = false,\n"));
  assert!(customer.contains("    var name: String? = null,\n"));
  assert!(customer.contains("    override var created: Date? = null,\n"));
  assert!(customer.ends_with(") : BaseEntity, FavoriteEntity\n"));

  let group = source_of(&units, "ColorGroup");
  assert!(!group.contains("colors"));
  assert!(group.ends_with(") : IdEntity\n"));
}

#[test]
fn test_link_entity_has_composite_key() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = EntityGenerator::new(&context).units(&plan);

  let link = source_of(&units, "ColorGroupLink");
  assert!(link.contains("    primaryKeys = [\"id_color\", \"id_color_group\"],\n"));
  assert!(link.contains("            entity = Color::class,\n"));
  assert!(link.contains("            entity = ColorGroup::class,\n"));
  assert!(link.contains("    @ColumnInfo(name = \"id_color\")\n    var idColor: Int = 0,\n"));
  assert!(link.contains("    @ColumnInfo(name = \"id_color_group\")\n    var idColorGroup: Int = 0\n)\n"));
  assert!(!link.contains("PrimaryKey("));
}

#[test]
fn test_dao_queries() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = DaoGenerator::new(&context).units(&plan);

  assert_eq!(units.len(), 12);

  let base = units
    .iter()
    .find(|unit| unit.name() == "OrderBaseDao")
    .unwrap();
  assert_eq!(base.package(), "com.acme.database.dao.base");
  let source = base.source();
  assert!(source.contains("import androidx.lifecycle.LiveData\n"));
  assert!(source.contains("import com.acme.database.entity.Order\n"));
  assert!(source.contains("interface OrderBaseDao : BaseEntityDao<Order> {"));
  assert!(source.contains(
    "    @Query(\"SELECT * FROM `order` WHERE id_order = :id\")\n    override fun findById(id: Int): LiveData<Order?>\n"
  ));
  assert!(source.contains("    override fun findAll(): LiveData<List<Order>>\n"));
  assert!(source.contains(
    "    @Query(\"SELECT * FROM `order` WHERE modified BETWEEN :since AND :before\")\n    override fun \
     findSinceBefore(since: Date, before: Date): List<Order>\n"
  ));
  assert!(source.contains(
    "    @Query(\"SELECT * FROM `order` WHERE is_deleted = 0\")\n    fun findAllActive(): LiveData<List<Order>>\n"
  ));
  assert!(source.contains(
    "    @Query(\"SELECT * FROM `order` WHERE id_customer = :id\")\n    fun findByCustomer(id: Int): List<Order>\n"
  ));
  assert!(source.contains(
    "    @Query(\n        \"SELECT * FROM `customer` WHERE id_customer = (SELECT id_customer FROM `order` WHERE id_order \
     = :id)\"\n    )\n    fun findCustomer(id: Int): Customer?\n"
  ));

  let dao = units.iter().find(|unit| unit.name() == "OrderDao").unwrap().source();
  assert!(dao.contains("import com.acme.database.dao.base.OrderBaseDao\n"));
  assert!(dao.contains("@Dao\ninterface OrderDao : OrderBaseDao\n"));

  let line = units.iter().find(|unit| unit.name() == "OrderLineBaseDao").unwrap().source();
  assert!(line.contains("interface OrderLineBaseDao : BaseDao<OrderLine> {"));
  assert!(!line.contains("findSinceBefore"));
}

#[test]
fn test_link_dao_queries() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = DaoGenerator::new(&context).units(&plan);

  let link = source_of(&units, "ColorGroupLinkBaseDao");
  assert!(link.contains("interface ColorGroupLinkBaseDao : BaseDao<ColorGroupLink> {"));
  assert!(link.contains("    fun findByGroupId(id: Int): List<ColorGroupLink>\n"));
  assert!(link.contains("\"SELECT * FROM `color_group_link` WHERE id_color_group = :id AND id_color NOT IN (:list)\""));
  assert!(link.contains("    fun findUnnecessary(id: Int, list: List<Int>): List<ColorGroupLink>\n"));
  assert!(!link.contains("findById"));
}

#[test]
fn test_database_registers_sorted_entities() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let source = DatabaseGenerator::new(&context).unit(&plan).source();

  assert!(source.contains("package com.acme.database\n"));
  assert!(source.contains(
    "@Database(\n    entities = [\n        Color::class,\n        ColorGroup::class,\n        ColorGroupLink::class,\n        \
     Customer::class,\n        Order::class,\n        OrderLine::class\n    ],\n    version = 1\n)\n"
  ));
  assert!(source.contains("abstract class AppDatabase : RoomDatabase() {\n    abstract fun colorDao(): ColorDao\n\n"));
  assert!(source.contains("    abstract fun orderLineDao(): OrderLineDao\n}\n"));
  assert!(source.contains("import com.acme.database.dao.ColorGroupLinkDao\n"));
  assert!(source.contains("import com.acme.database.entity.OrderLine\n"));
}

#[test]
fn test_mapper_converts_references_and_enums() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = MapperGenerator::new(&context).units(&plan);

  let names = units.iter().map(ArtifactUnit::name).collect::<Vec<_>>();
  assert_eq!(
    names,
    vec!["CustomerMapper", "OrderMapper", "ColorGroupMapper", "ColorMapper", "OrderLineMapper"]
  );

  let expected = "\
// Generated by protein-gen. DO NOT EDIT.

package com.acme.sync.mapper

import com.acme.database.entity.Order
import com.acme.model.OrderStatus
import com.acme.sync.entity.OrderDto

class OrderMapper {
    fun map(entity: OrderDto): Order {
        return Order(
            id = entity.id,
            idCustomer = entity.customer?.id,
            status = entity.status?.let { OrderStatus.from(it) },
            total = entity.total,
            tags = entity.tags,
            isDeleted = entity.isDeleted,
            modified = entity.modified
        )
    }

    fun map(entity: Order): OrderDto {
        return OrderDto(
            id = entity.id,
            status = entity.status?.toString(),
            total = entity.total,
            tags = entity.tags,
            isDeleted = entity.isDeleted,
            modified = entity.modified
        )
    }
}
";
  assert_eq!(source_of(&units, "OrderMapper"), expected);

  let customer = source_of(&units, "CustomerMapper");
  assert!(customer.contains("            isFavorite = entity.isFavorite ?: false,\n"));
}

#[test]
fn test_map_helpers_translate_ids() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = MapHelperGenerator::new(&context).units(&plan);

  assert!(units.iter().all(|unit| unit.package() == "com.acme.sync.mapper.helper"));

  let helper = source_of(&units, MAP_HELPER);
  assert!(helper.contains("import com.acme.sync.SyncParams\n"));
  assert!(helper.contains("class MapHelper(\n    val st: Map<String, Map<Int, SyncParams>>\n) {\n"));
  assert!(helper.contains("    val customerId: Map<Int, SyncParams> = st[\"customer\"] ?: mapOf()\n"));
  assert!(helper.contains("    val orderLineId: Map<Int, SyncParams> = st[\"order_line\"] ?: mapOf()\n"));
  assert!(helper.contains(
    "    fun map(order: OrderDto, mapper: OrderMapper): Order {
        val mapped = mapper.map(order)
        mapped.id = mapped.id?.let { orderId[it]?.localId }
        mapped.idCustomer = mapped.idCustomer?.let { customerId[it]?.localId }
        return mapped
    }
"
  ));
  assert!(!helper.contains("colorGroupLinkId"));

  let put = source_of(&units, PUT_MAP_HELPER);
  assert!(put.contains("class PutMapHelper {\n    val customerId: MutableSet<Int?> = mutableSetOf()\n"));
  assert!(put.contains(
    "    fun map(orderLine: OrderLine, mapper: OrderLineMapper): OrderLineDto {
        orderLineId.add(orderLine.id)
        orderId.add(orderLine.idOrder)
        return mapper.map(orderLine)
    }
"
  ));
}

#[test]
fn test_enum_class_render() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = EnumGenerator::new(&context).units(&plan);

  let expected = "\
// Generated by protein-gen. DO NOT EDIT.

package com.acme.model

enum class OrderStatus(
    val value: String
) {
    OPEN(\"open\"),
    IN_PROGRESS(\"in-progress\"),
    CLOSED(\"closed\");

    override fun toString(): String {
        return value
    }

    companion object {
        fun from(value: String): OrderStatus? {
            return values().firstOrNull { it.value == value }
        }
    }
}
";
  assert_eq!(units.len(), 1);
  assert_eq!(source_of(&units, "OrderStatus"), expected);
}

#[test]
fn test_enum_package_override() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let mut config = config();
  config.enum_package = Some("com.acme.types".to_string());
  let context = ArtifactContext::from_config(&config);

  let units = EnumGenerator::new(&context).units(&plan);
  assert_eq!(units[0].package(), "com.acme.types");

  let entity = source_of(&EntityGenerator::new(&context).units(&plan), "Order");
  assert!(entity.contains("import com.acme.types.OrderStatus\n"));
}

#[test]
fn test_undo_triggers() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let script = TriggerGenerator::script(&plan);

  assert_eq!(script.triggers.len(), 19);
  assert_eq!(script.triggers[0], UNDO_LOG_SETUP);
  assert_eq!(script.drop_commands.len(), 18);
  assert_eq!(script.drop_commands[3], "DROP TRIGGER IF EXISTS `order_insert_undo`");

  let tables = TriggerGenerator::tables(&plan);
  let order = &tables[1];
  assert_eq!(
    order.insert,
    "CREATE TEMP TRIGGER IF NOT EXISTS `order_insert_undo` AFTER INSERT ON `order` BEGIN INSERT INTO \
     undo_log(sql) VALUES('DELETE FROM `order` WHERE ' || '`id_order`=' || quote(new.`id_order`)); END"
  );

  let line = &tables[4];
  assert_eq!(
    line.update,
    "CREATE TEMP TRIGGER IF NOT EXISTS `order_line_update_undo` AFTER UPDATE ON `order_line` BEGIN INSERT INTO \
     undo_log(sql) VALUES('UPDATE `order_line` SET ' || '`id_order_line`=' || quote(old.`id_order_line`) || ',' || \
     '`id_order`=' || quote(old.`id_order`) || ',' || '`quantity`=' || quote(old.`quantity`) || ' WHERE ' || \
     '`id_order_line`=' || quote(new.`id_order_line`)); END"
  );
  assert_eq!(
    line.delete,
    "CREATE TEMP TRIGGER IF NOT EXISTS `order_line_delete_undo` BEFORE DELETE ON `order_line` BEGIN INSERT INTO \
     undo_log(sql) VALUES('INSERT INTO `order_line`(`id_order_line`,`id_order`,`quantity`) VALUES(' || \
     quote(old.`id_order_line`) || ',' || quote(old.`id_order`) || ',' || quote(old.`quantity`) || ')'); END"
  );

  let link = &tables[5];
  assert!(link.insert.contains(
    "'`id_color`=' || quote(new.`id_color`) || ' AND ' || '`id_color_group`=' || quote(new.`id_color_group`)"
  ));
}

#[test]
fn test_triggers_without_key_use_rowid() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "notes": { "type": "array", "items": { "$ref": "#/definitions/Note" } } }
      },
      "Note": { "type": "object", "properties": { "text": { "type": "string" } } }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let tables = TriggerGenerator::tables(&plan);

  assert_eq!(tables.len(), 1);
  assert!(
    tables[0]
      .insert
      .ends_with("VALUES('DELETE FROM `note` WHERE ' || 'rowid=' || quote(new.rowid)); END")
  );
}

#[test]
fn test_trigger_unit_lists_statements() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let generator = TriggerGenerator::new(&context);
  let unit = generator.unit(&TriggerGenerator::script(&plan));

  assert_eq!(unit.package(), "com.acme.database");
  let source = unit.source();
  assert!(source.contains("object UndoTriggers {\n    val triggers: List<String> = listOf(\n        \"CREATE TEMP TABLE"));
  assert!(source.contains("    val dropTriggersCommands: List<String> = listOf(\n        \"DROP TRIGGER IF EXISTS"));
}

#[test]
fn test_nullable_arrays_default_to_empty_lists() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "notes": { "type": "array", "items": { "$ref": "#/definitions/Note" } } }
      },
      "Note": {
        "type": "object",
        "properties": {
          "id": { "type": "integer" },
          "tags": { "type": "array", "nullable": true, "items": { "type": "string" } },
          "scores": { "type": "array", "x-nullable": true, "items": { "type": "integer" } },
          "labels": { "type": ["array", "null"], "items": { "type": "string" } }
        }
      }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());

  let dto = source_of(&SyncDtoGenerator::new(&context).units(&plan), "NoteDto");
  assert!(dto.contains("    val tags: List<String> = listOf(),\n"));
  assert!(dto.contains("    val scores: List<Int> = listOf(),\n"));
  assert!(dto.contains("    val labels: List<String> = listOf()\n"));
  assert!(!dto.contains("List<String>?"));

  let entity = source_of(&EntityGenerator::new(&context).units(&plan), "Note");
  assert!(entity.contains("    @ColumnInfo(name = \"tags\")\n    var tags: List<String> = listOf(),\n"));
  assert!(entity.contains("    @ColumnInfo(name = \"scores\")\n    var scores: List<Int> = listOf(),\n"));
  assert!(entity.contains("    @ColumnInfo(name = \"labels\")\n    var labels: List<String> = listOf()\n"));
}

#[test]
fn test_long_id_is_not_a_primary_key() {
  let model = resolve(json!({
    "swagger": "2.0",
    "definitions": {
      "SyncData": {
        "type": "object",
        "properties": { "visits": { "type": "array", "items": { "$ref": "#/definitions/Visit" } } }
      },
      "Visit": {
        "type": "object",
        "properties": {
          "id": { "type": "integer", "format": "int64" },
          "note": { "type": "string" }
        }
      }
    }
  }));
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());

  let entity = source_of(&EntityGenerator::new(&context).units(&plan), "Visit");
  assert!(!entity.contains("@PrimaryKey"));
  assert!(entity.contains("    @ColumnInfo(name = \"id\")\n    var id: Long? = null,\n"));
  assert!(entity.ends_with("    var note: String? = null\n)\n"));

  let helper = source_of(&MapHelperGenerator::new(&context).units(&plan), MAP_HELPER);
  assert!(helper.contains("        val mapped = mapper.map(visit)\n        return mapped\n"));
  assert!(!helper.contains("visitId"));
}

#[test]
fn test_domain_models_reference_targets() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = DomainGenerator::new(&context).units(&plan);

  let names = units.iter().map(ArtifactUnit::name).collect::<Vec<_>>();
  assert_eq!(
    names,
    vec![
      "Customer",
      "Order",
      "ColorGroup",
      "Color",
      "OrderLine",
      "CustomerDomainMapper",
      "OrderDomainMapper",
      "ColorGroupDomainMapper",
      "ColorDomainMapper",
      "OrderLineDomainMapper",
    ]
  );

  let expected = "\
// Generated by protein-gen. DO NOT EDIT.

package com.acme.domain.model

import android.os.Parcelable
import com.acme.model.OrderStatus
import java.util.Date
import kotlinx.parcelize.Parcelize

@Parcelize
data class Order(
    var id: Int? = null,
    var customer: Customer? = null,
    var status: OrderStatus? = null,
    var total: Float? = null,
    var tags: List<String> = listOf(),
    var isDeleted: Boolean? = null,
    var modified: Date? = null
) : Parcelable
";
  assert_eq!(source_of(&units, "Order"), expected);

  let customer = source_of(&units, "Customer");
  assert!(customer.contains("    var isFavorite: Boolean = false,\n"));
  let line = source_of(&units, "OrderLine");
  assert!(line.contains("    var order: Order? = null,\n"));
  assert!(!line.contains("idOrder"));
}

#[test]
fn test_domain_mapper_keeps_reference_ids() {
  let model = resolve(sync_fixture());
  let plan = ModelPlan::build(&model, NamingResolver::default());
  let context = ArtifactContext::from_config(&config());
  let units = DomainGenerator::new(&context).units(&plan);

  let expected = "\
// Generated by protein-gen. DO NOT EDIT.

package com.acme.domain.mapper

import com.acme.domain.model.Order

class OrderDomainMapper {
    fun transform(entity: Order): com.acme.database.entity.Order {
        return com.acme.database.entity.Order(
            id = entity.id,
            idCustomer = entity.customer?.id,
            status = entity.status,
            total = entity.total,
            tags = entity.tags,
            isDeleted = entity.isDeleted,
            modified = entity.modified
        )
    }

    fun transform(entity: com.acme.database.entity.Order): Order {
        return Order(
            id = entity.id,
            status = entity.status,
            total = entity.total,
            tags = entity.tags,
            isDeleted = entity.isDeleted,
            modified = entity.modified
        )
    }
}
";
  assert_eq!(source_of(&units, "OrderDomainMapper"), expected);
  assert!(units.iter().all(|unit| unit.package().starts_with("com.acme.domain.")));
}
