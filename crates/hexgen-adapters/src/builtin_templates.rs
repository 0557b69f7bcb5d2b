//! Templates that ship with hexgen.
//!
//! One literal template per [`ArtifactKind`]. A `<templates_dir>/<kind>.tpl`
//! file replaces the built-in one (see [`crate::renderer::TemplateSet`]).
//!
//! Placeholders are `{{VARIABLE}}`; the renderer fills in the generated
//! blocks (`PROPERTIES`, `ACCESSORS`, `LOOKUPS`, `DEPENDENCIES`,
//! `HANDLER_BODY`, ...) before substitution.

use hexgen_core::domain::ArtifactKind;

pub fn template(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Entity => ENTITY,
        ArtifactKind::RepositoryInterface => REPOSITORY_INTERFACE,
        ArtifactKind::Repository => REPOSITORY,
        ArtifactKind::Command => COMMAND,
        ArtifactKind::CommandHandler => COMMAND_HANDLER,
        ArtifactKind::Query => QUERY,
        ArtifactKind::QueryHandler => QUERY_HANDLER,
        ArtifactKind::Controller => CONTROLLER,
    }
}

const ENTITY: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\Domain\Entity;

final class {{NAME}}
{
    private string $id;

{{PROPERTIES}}
    public function getId(): string
    {
        return $this->id;
    }
{{ACCESSORS}}}
"#;

const REPOSITORY_INTERFACE: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\Domain\Repository;

use {{NAMESPACE}}\Domain\Entity\{{NAME}};

interface {{NAME}}RepositoryInterface
{
    public function find(string $id): ?{{NAME}};

    public function save({{NAME}} ${{NAME_CAMEL}}): void;

    public function remove({{NAME}} ${{NAME_CAMEL}}): void;
{{LOOKUPS}}}
"#;

const REPOSITORY: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\Infrastructure\Persistence;

use {{NAMESPACE}}\Domain\Entity\{{NAME}};
use {{NAMESPACE}}\Domain\Repository\{{NAME}}RepositoryInterface;
use Doctrine\ORM\EntityManagerInterface;

final class {{NAME}}Repository implements {{NAME}}RepositoryInterface
{
    public function __construct(
        private readonly EntityManagerInterface $entityManager,
    ) {
    }

    public function find(string $id): ?{{NAME}}
    {
        return $this->entityManager->find({{NAME}}::class, $id);
    }

    public function save({{NAME}} ${{NAME_CAMEL}}): void
    {
        $this->entityManager->persist(${{NAME_CAMEL}});
        $this->entityManager->flush();
    }

    public function remove({{NAME}} ${{NAME_CAMEL}}): void
    {
        $this->entityManager->remove(${{NAME_CAMEL}});
        $this->entityManager->flush();
    }
{{LOOKUP_IMPLS}}}
"#;

const COMMAND: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\Application\Command\{{NAME}};

final class {{NAME}}Command
{
    public function __construct(
{{MESSAGE_FIELDS}}    ) {
    }
}
"#;

const COMMAND_HANDLER: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\Application\Command\{{NAME}};

{{USES}}use Symfony\Component\Messenger\Attribute\AsMessageHandler;

#[AsMessageHandler(bus: '{{BUS}}')]
final class {{NAME}}Handler
{
    public function __construct(
{{DEPENDENCIES}}    ) {
    }

    public function __invoke({{NAME}}Command $command): void
    {
{{HANDLER_BODY}}    }
}
"#;

const QUERY: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\Application\Query\{{NAME}};

final class {{NAME}}Query
{
    public function __construct(
{{MESSAGE_FIELDS}}    ) {
    }
}
"#;

const QUERY_HANDLER: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\Application\Query\{{NAME}};

{{USES}}use Symfony\Component\Messenger\Attribute\AsMessageHandler;

#[AsMessageHandler(bus: '{{BUS}}')]
final class {{NAME}}Handler
{
    public function __construct(
{{DEPENDENCIES}}    ) {
    }

    public function __invoke({{NAME}}Query $query): mixed
    {
{{HANDLER_BODY}}    }
}
"#;

const CONTROLLER: &str = r#"<?php

declare(strict_types=1);

namespace {{NAMESPACE}}\UI\Http;

use Symfony\Bundle\FrameworkBundle\Controller\AbstractController;
use Symfony\Component\HttpFoundation\JsonResponse;
use Symfony\Component\Routing\Attribute\Route;

#[Route('{{ROUTE_PREFIX}}/{{NAME_KEBAB}}', name: '{{MODULE_SNAKE}}_{{NAME_SNAKE}}_')]
final class {{NAME}}Controller extends AbstractController
{
    #[Route('', name: 'index', methods: ['GET'])]
    public function index(): JsonResponse
    {
        return $this->json([]);
    }
}
"#;
